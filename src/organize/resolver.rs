use std::time::Duration;

use tokio::time::sleep;

use super::ArtistGenreSource;
use crate::{management::GenreCache, types::Artist, warning};

/// Label of a track whose artists carry no genre.
pub const UNKNOWN_GENRE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Unresolved,
}

impl Resolution {
    pub fn label(&self) -> &str {
        match self {
            Resolution::Resolved(genre) => genre.as_str(),
            Resolution::Unresolved => UNKNOWN_GENRE,
        }
    }
}

/// Finds a track's genre from the genres of its artists.
#[derive(Debug, Clone, Default)]
pub struct GenreResolver {
    delay: Duration,
}

impl GenreResolver {
    /// `delay` is waited after every call to the artist source, never after
    /// a cache hit.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Walks the artists in credit order and returns the first genre of the
    /// first artist that has any.
    ///
    /// Artists without an id are skipped. A cache miss triggers exactly one
    /// lookup, whose result is stored even when empty. A failed lookup is
    /// reported and counts as "no genres" for this track without being cached.
    pub async fn resolve(
        &self,
        cache: &mut GenreCache,
        source: &dyn ArtistGenreSource,
        artists: &[Artist],
    ) -> Resolution {
        for artist in artists {
            let Some(artist_id) = artist.id.as_deref().filter(|id| !id.is_empty()) else {
                continue;
            };

            if !cache.contains(artist_id) {
                let fetched = source.artist_genres(artist_id).await;
                if !self.delay.is_zero() {
                    sleep(self.delay).await;
                }

                match fetched {
                    Ok(genres) => {
                        cache.store(artist_id, genres);
                    }
                    Err(e) => {
                        warning!("Error fetching artist info for {}: {}", artist.name, e);
                        continue;
                    }
                }
            }

            if let Some(genre) = cache.lookup(artist_id).and_then(|g| g.first()) {
                return Resolution::Resolved(genre.clone());
            }
        }

        Resolution::Unresolved
    }
}
