mod cache;

pub use cache::GenreCache;
