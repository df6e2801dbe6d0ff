//! # Spotify Integration Module
//!
//! Read-only access to the Spotify Web API for the genre organizer: the
//! tracks of a playlist and the genres of an artist.
//!
//! ## Authentication
//!
//! [`auth`] implements the client-credentials flow. The application id and
//! secret are exchanged for an app token, which is kept in memory and renewed
//! four minutes before it expires. No user login is involved, so only public
//! playlists can be read.
//!
//! ## Endpoints
//!
//! - `POST /api/token` - client-credentials token
//! - `GET /playlists/{id}/tracks` - playlist items, 100 per page, following `next`
//! - `GET /artists/{id}` - artist metadata including `genres`
//!
//! ## Error Handling
//!
//! Every request goes through [`SpotifyClient::get_json`]:
//! - **502 Bad Gateway** is retried after a short pause
//! - **429 Too Many Requests** waits for `Retry-After` (up to 120 seconds)
//! - **401 Unauthorized** drops the cached token and retries with a new one
//!
//! Retries are bounded by [`MAX_RETRIES`]; anything else becomes an
//! [`OrganizeError::Upstream`]. The HTTP client carries an explicit request
//! timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::{sync::Mutex, time::sleep};

use crate::{
    config::Config,
    error::OrganizeError,
    organize::{ArtistGenreSource, PlaylistSource},
    types::PlaylistItem,
    warning,
};

pub mod artists;
pub mod auth;
pub mod playlist;

use auth::TokenManager;

/// Upper bound on retried attempts for one request.
pub const MAX_RETRIES: u32 = 3;

const BAD_GATEWAY_PAUSE: Duration = Duration::from_secs(2);
const MAX_RETRY_AFTER_SECS: u64 = 120;

#[derive(Debug)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Result<Self, OrganizeError> {
        let http = config.http_client()?;

        Ok(Self {
            http,
            api_url: config.spotify_api_url.trim_end_matches('/').to_string(),
            tokens: Mutex::new(TokenManager::new(
                &config.client_id,
                &config.client_secret,
                &config.spotify_token_url,
            )),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Sends an authenticated GET request and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, OrganizeError> {
        let mut attempt = 0;

        loop {
            let token = self.tokens.lock().await.get_valid_token(&self.http).await?;
            let response = self.http.get(url).bearer_auth(token).send().await?;
            let status = response.status();

            if attempt < MAX_RETRIES {
                match status {
                    StatusCode::BAD_GATEWAY => {
                        attempt += 1;
                        sleep(BAD_GATEWAY_PAUSE).await;
                        continue;
                    }
                    StatusCode::TOO_MANY_REQUESTS => {
                        let retry_after = response
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(1);
                        if retry_after <= MAX_RETRY_AFTER_SECS {
                            attempt += 1;
                            sleep(Duration::from_secs(retry_after)).await;
                            continue;
                        }
                        warning!(
                            "Retry after has reached an abnormal high of {} seconds.",
                            retry_after
                        );
                    }
                    StatusCode::UNAUTHORIZED => {
                        attempt += 1;
                        self.tokens.lock().await.invalidate();
                        continue;
                    }
                    _ => {}
                }
            }

            let response = response.error_for_status()?;
            return Ok(response.json::<T>().await?);
        }
    }
}

#[async_trait]
impl PlaylistSource for SpotifyClient {
    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>, OrganizeError> {
        playlist::get_playlist_tracks(self, playlist_id).await
    }
}

#[async_trait]
impl ArtistGenreSource for SpotifyClient {
    async fn artist_genres(&self, artist_id: &str) -> Result<Vec<String>, OrganizeError> {
        artists::get_artist_genres(self, artist_id).await
    }
}
