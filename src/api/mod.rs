//! # API Module
//!
//! HTTP handlers of the genre organizer service.
//!
//! ## Endpoints
//!
//! - [`organize_playlist`] - `POST /organize/playlist`, body `{"link": string}`
//! - [`organize_text`] - `POST /organize/text`, body `{"text": string}`
//! - [`health`] - `GET /health`, status and version
//!
//! Both organize endpoints answer with a JSON array of `[genre, [songs...]]`
//! pairs. Failures answer with `{"error": message}`: 400 for bad input, 500
//! when the playlist cannot be fetched. A failed model classification is not
//! an error; the affected songs are returned under the catch-all genre.
//!
//! ## Shared State
//!
//! [`AppState`] is attached to the router as an `Extension`. It owns the
//! service clients and the artist genre cache. The cache sits behind a single
//! async mutex held for the artist pass of a request only. Concurrent playlist
//! requests look up artists one after the other, but their model calls overlap.

use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error::OrganizeError,
    gemini::GeminiClient,
    management::GenreCache,
    organize::{ArtistGenreSource, GenreResolver, PlaylistSource, TextModel},
    spotify::SpotifyClient,
    types::ErrorResponse,
};

mod health;
mod organize;

pub use health::health;
pub use organize::{organize_playlist, organize_text};

pub struct AppState {
    pub playlists: Arc<dyn PlaylistSource>,
    pub artists: Arc<dyn ArtistGenreSource>,
    pub model: Arc<dyn TextModel>,
    pub resolver: GenreResolver,
    pub cache: Mutex<GenreCache>,
}

impl AppState {
    pub fn new(
        playlists: Arc<dyn PlaylistSource>,
        artists: Arc<dyn ArtistGenreSource>,
        model: Arc<dyn TextModel>,
        resolver: GenreResolver,
    ) -> Self {
        Self {
            playlists,
            artists,
            model,
            resolver,
            cache: Mutex::new(GenreCache::new()),
        }
    }

    /// Wires the Spotify and Gemini clients described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, OrganizeError> {
        let spotify = Arc::new(SpotifyClient::new(config)?);
        let gemini = Arc::new(GeminiClient::new(config)?);

        Ok(Self::new(
            Arc::clone(&spotify) as Arc<dyn PlaylistSource>,
            spotify,
            gemini,
            GenreResolver::new(config.artist_lookup_delay),
        ))
    }
}

impl IntoResponse for OrganizeError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            OrganizeError::Input(message) => (StatusCode::BAD_REQUEST, message),
            OrganizeError::Upstream(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
