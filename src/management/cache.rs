use std::collections::HashMap;

/// Artist id to genre list, filled lazily while a run resolves tracks.
///
/// An entry is written at most once; a present key with an empty list means
/// the artist was looked up and has no genres, an absent key means it was
/// never looked up. Nothing is evicted or persisted, so the cache grows with
/// the number of distinct artists seen by the process.
#[derive(Debug, Default)]
pub struct GenreCache {
    genres: HashMap<String, Vec<String>>,
}

impl GenreCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, artist_id: &str) -> Option<&Vec<String>> {
        self.genres.get(artist_id)
    }

    /// Stores the genres for `artist_id` unless the id is already present.
    /// Returns `true` when the entry was written.
    pub fn store(&mut self, artist_id: &str, genres: Vec<String>) -> bool {
        if self.genres.contains_key(artist_id) {
            return false;
        }
        self.genres.insert(artist_id.to_string(), genres);
        true
    }

    pub fn contains(&self, artist_id: &str) -> bool {
        self.genres.contains_key(artist_id)
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}
