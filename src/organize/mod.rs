//! # Organize Module
//!
//! The genre pipeline: fetch → lookup → fallback-classify → group.
//!
//! ```text
//! playlist items ──► GenreResolver (artist genres, cached) ──► resolved genre
//!                          │
//!                          └─ unresolved ──► fallback (one model call) ──► model genre
//!                                                   │
//!                                                   └─ no match ──► catch-all bucket
//! ```
//!
//! The external services are reached through three traits so that the
//! pipeline can run against the Spotify and Gemini clients or against
//! in-memory fakes:
//!
//! - [`PlaylistSource`] - paged playlist listing
//! - [`ArtistGenreSource`] - artist id to genre tags
//! - [`TextModel`] - prompt to free text
//!
//! Each run is sequential: tracks are resolved one after the other and the
//! model is called at most once per run. [`organize_tracks`] is
//! [`resolve_tracks`] followed by [`classify_tracks`]; only the first needs
//! the genre cache, so a shared cache can be released before the model call.

use async_trait::async_trait;

use crate::{error::OrganizeError, types::PlaylistItem};

mod aggregate;
mod fallback;
mod resolver;

pub use aggregate::{
    PLAYLIST_CATCH_ALL, TEXT_CATCH_ALL, classify_tracks, organize_songs, organize_tracks,
    resolve_tracks,
};
pub use fallback::{build_prompt, classify_unresolved, parse_classifications};
pub use resolver::{GenreResolver, Resolution, UNKNOWN_GENRE};

/// Supplies every item of a playlist, following pagination to the end.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>, OrganizeError>;
}

/// Supplies the genre tags of one artist.
#[async_trait]
pub trait ArtistGenreSource: Send + Sync {
    async fn artist_genres(&self, artist_id: &str) -> Result<Vec<String>, OrganizeError>;
}

/// A generative text model. `Ok(None)` means the model answered without text.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, OrganizeError>;
}
