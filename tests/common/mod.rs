#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use genresort::{
    error::OrganizeError,
    organize::{ArtistGenreSource, PlaylistSource, TextModel},
    types::{Artist, PlaylistItem, Track},
};

/// Artist source backed by a map; records every requested id.
#[derive(Default)]
pub struct FakeArtists {
    genres: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeArtists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, artist_id: &str, genres: &[&str]) -> Self {
        self.genres.insert(
            artist_id.to_string(),
            genres.iter().map(|g| g.to_string()).collect(),
        );
        self
    }

    pub fn failing(mut self, artist_id: &str) -> Self {
        self.failing.insert(artist_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, artist_id: &str) -> usize {
        self.calls().iter().filter(|id| *id == artist_id).count()
    }
}

#[async_trait]
impl ArtistGenreSource for FakeArtists {
    async fn artist_genres(&self, artist_id: &str) -> Result<Vec<String>, OrganizeError> {
        self.calls.lock().unwrap().push(artist_id.to_string());
        if self.failing.contains(artist_id) {
            return Err(OrganizeError::Upstream(format!("artist {} unavailable", artist_id)));
        }
        Ok(self.genres.get(artist_id).cloned().unwrap_or_default())
    }
}

/// Text model with a canned reply; records every prompt.
pub struct FakeModel {
    reply: Result<Option<String>, String>,
    delay: Duration,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(Some(text.to_string())),
            delay: Duration::ZERO,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn silent() -> Self {
        Self {
            reply: Ok(None),
            delay: Duration::ZERO,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err("quota exceeded".to_string()),
            delay: Duration::ZERO,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Waits `delay` before every reply.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for FakeModel {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, OrganizeError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone().map_err(OrganizeError::Classification)
    }
}

/// Playlist source returning fixed items, or failing when built with `None`.
pub struct FakePlaylist {
    items: Option<Vec<PlaylistItem>>,
    requested: Mutex<Vec<String>>,
}

impl FakePlaylist {
    pub fn new(items: Vec<PlaylistItem>) -> Self {
        Self {
            items: Some(items),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn broken() -> Self {
        Self {
            items: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaylistSource for FakePlaylist {
    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>, OrganizeError> {
        self.requested.lock().unwrap().push(playlist_id.to_string());
        self.items
            .clone()
            .ok_or_else(|| OrganizeError::Upstream("404 Not Found".to_string()))
    }
}

/// A playlist item for `name` credited to `(artist_id, artist_name)` pairs.
pub fn item(name: &str, artists: &[(Option<&str>, &str)]) -> PlaylistItem {
    PlaylistItem::new(Track {
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|(id, artist_name)| Artist::new(*id, artist_name))
            .collect(),
    })
}
