//! Configuration management for the playlist genre organizer.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory (`genresort/.env`)
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)
//!
//! Required credentials are checked once by [`Config::from_env`] so a missing
//! key stops the program at startup instead of in the middle of a request.

use std::{env, path::PathBuf, time::Duration};

use crate::error::OrganizeError;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro-exp-03-25";
pub const DEFAULT_ARTIST_LOOKUP_DELAY_MS: u64 = 100;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OUTPUT_FILE: &str = "organized_playlist.txt";

/// Loads environment variables from `.env` files.
///
/// Creates the application directory inside the platform-specific local data
/// directory if it doesn't exist, then loads `genresort/.env` from there and
/// finally a `.env` from the working directory. Variables that are already set
/// are never overridden, and a missing file is not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/genresort/.env`
/// - macOS: `~/Library/Application Support/genresort/.env`
/// - Windows: `%LOCALAPPDATA%/genresort/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("genresort/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    // a .env next to the working directory is optional
    let _ = dotenv::dotenv();

    Ok(())
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub gemini_api_key: String,
    pub playlist_link: Option<String>,
    pub server_address: String,
    pub spotify_api_url: String,
    pub spotify_token_url: String,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub artist_lookup_delay: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizeError::Config`] if `CLIENT_ID`, `CLIENT_SECRET` or
    /// `GEMINI_API_KEY` is missing or empty, or if a numeric setting cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, OrganizeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Used by
    /// [`Config::from_env`] and by tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OrganizeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            optional(key).ok_or_else(|| OrganizeError::Config(format!("{} must be set", key)))
        };
        let number = |key: &str, default: u64| match optional(key) {
            Some(v) => v.trim().parse::<u64>().map_err(|e| {
                OrganizeError::Config(format!("{} is not a valid number: {}", key, e))
            }),
            None => Ok(default),
        };

        Ok(Self {
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            gemini_api_key: required("GEMINI_API_KEY")?,
            playlist_link: optional("SPOTIFY_PLAYLIST_LINK"),
            server_address: optional("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            spotify_api_url: optional("SPOTIFY_API_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string()),
            spotify_token_url: optional("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string()),
            gemini_api_url: optional("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            gemini_model: optional("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            artist_lookup_delay: Duration::from_millis(number(
                "ARTIST_LOOKUP_DELAY_MS",
                DEFAULT_ARTIST_LOOKUP_DELAY_MS,
            )?),
            request_timeout: Duration::from_secs(number(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
        })
    }

    /// The playlist link for batch runs: the explicit override if given,
    /// otherwise `SPOTIFY_PLAYLIST_LINK`.
    pub fn playlist_link(&self, link: Option<String>) -> Result<String, OrganizeError> {
        link.filter(|l| !l.trim().is_empty())
            .or_else(|| self.playlist_link.clone())
            .ok_or_else(|| {
                OrganizeError::Config(
                    "SPOTIFY_PLAYLIST_LINK must be set or --link given".to_string(),
                )
            })
    }

    /// HTTP client used by both upstream clients, with the configured request
    /// timeout. A client that cannot be built is a configuration error.
    pub fn http_client(&self) -> Result<reqwest::Client, OrganizeError> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| OrganizeError::Config(format!("Failed to build HTTP client: {}", e)))
    }
}
