use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCredentialsResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// An artist credited on a track. Local files carry artists without an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl Artist {
    pub fn new(id: Option<&str>, name: &str) -> Self {
        Self {
            id: id.map(str::to_string),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

impl Track {
    /// Artist names joined with `", "`, in credit order.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

/// One entry of a playlist listing. `track` is `null` for removed or
/// unavailable entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}

impl PlaylistItem {
    pub fn new(track: Track) -> Self {
        Self { track: Some(track) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// A song whose genre could not be found through artist metadata and
/// which is handed to the fallback classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedSong {
    pub display_name: String,
    pub name: String,
    pub artists: String,
}

impl UnresolvedSong {
    pub fn new(name: &str, artists: &str) -> Self {
        Self {
            display_name: format!("{} - {}", name, artists),
            name: name.to_string(),
            artists: artists.to_string(),
        }
    }

    /// Songs pasted as raw text may have no artist; the display name then
    /// drops the dangling separator.
    pub fn from_text(name: &str, artists: &str) -> Self {
        Self {
            display_name: format!("{} - {}", name, artists)
                .trim_matches(|c: char| c == ' ' || c == '-')
                .to_string(),
            name: name.to_string(),
            artists: artists.to_string(),
        }
    }

    /// The line sent to the model for this song.
    pub fn prompt_line(&self) -> String {
        format!("{} - {}", self.name, self.artists)
    }
}

/// Songs grouped by genre, in the order the genres were first seen.
///
/// Serializes as a JSON array of `[genre, [song, ...]]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreGrouping {
    groups: Vec<(String, Vec<String>)>,
}

impl GenreGrouping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, genre: &str, song: String) {
        match self.groups.iter_mut().find(|(g, _)| g == genre) {
            Some((_, songs)) => songs.push(song),
            None => self.groups.push((genre.to_string(), vec![song])),
        }
    }

    pub fn get(&self, genre: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(g, _)| g == genre)
            .map(|(_, songs)| songs.as_slice())
    }

    pub fn genres(&self) -> Vec<&str> {
        self.groups.iter().map(|(g, _)| g.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Vec<String>)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn song_count(&self) -> usize {
        self.groups.iter().map(|(_, songs)| songs.len()).sum()
    }
}

#[derive(Tabled)]
pub struct GenreTableRow {
    pub genre: String,
    pub songs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts concatenated and trimmed.
    /// `None` when the model produced no text.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Body of `POST /organize/playlist`. Fields stay untyped JSON so that a
/// wrong type reaches the handler instead of failing extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizePlaylistRequest {
    #[serde(default)]
    pub link: Option<serde_json::Value>,
}

impl OrganizePlaylistRequest {
    /// Reads the request from any JSON body. A body that is not an object
    /// counts as an empty request.
    pub fn from_json(body: serde_json::Value) -> Self {
        serde_json::from_value(body).unwrap_or_default()
    }
}

/// Body of `POST /organize/text`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizeTextRequest {
    #[serde(default)]
    pub text: Option<serde_json::Value>,
}

impl OrganizeTextRequest {
    pub fn from_json(body: serde_json::Value) -> Self {
        serde_json::from_value(body).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
