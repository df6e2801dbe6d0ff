use std::sync::Arc;

use axum::{Extension, Json};
use serde_json::Value;

use super::AppState;
use crate::{
    error::OrganizeError,
    organize,
    types::{GenreGrouping, OrganizePlaylistRequest, OrganizeTextRequest},
    utils, warning,
};

/// `POST /organize/playlist` with `{"link": "..."}`.
///
/// Fetches the playlist, resolves genres through artist metadata and the
/// model fallback, and answers with `[[genre, [song, ...]], ...]`. The
/// shared cache is locked for the artist pass only.
pub async fn organize_playlist(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<GenreGrouping>, OrganizeError> {
    let link = match OrganizePlaylistRequest::from_json(body).link {
        None | Some(Value::Null) => None,
        Some(Value::String(link)) => Some(link).filter(|l| !l.trim().is_empty()),
        Some(_) => {
            return Err(OrganizeError::Input(
                "Invalid Spotify playlist link".to_string(),
            ));
        }
    };
    let Some(link) = link else {
        return Err(OrganizeError::Input(
            "Missing 'link' in request body".to_string(),
        ));
    };

    let Some(playlist_id) = utils::get_playlist_id(&link) else {
        return Err(OrganizeError::Input(
            "Invalid Spotify playlist link".to_string(),
        ));
    };

    let items = match state.playlists.playlist_tracks(playlist_id).await {
        Ok(items) => items,
        Err(e) => {
            warning!("Error fetching playlist tracks: {}", e);
            return Err(OrganizeError::Upstream(
                "Could not retrieve playlist tracks".to_string(),
            ));
        }
    };

    let (grouping, unresolved) = {
        let mut cache = state.cache.lock().await;
        organize::resolve_tracks(&items, &mut cache, state.artists.as_ref(), &state.resolver)
            .await
    };
    let grouping = organize::classify_tracks(grouping, unresolved, state.model.as_ref()).await;

    Ok(Json(grouping))
}

/// `POST /organize/text` with `{"text": "..."}`.
///
/// Every non-blank line is a song; all of them go straight to the model
/// since pasted text has no artist ids to look up.
pub async fn organize_text(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<GenreGrouping>, OrganizeError> {
    let Some(Value::String(text)) = OrganizeTextRequest::from_json(body).text else {
        return Err(OrganizeError::Input(
            "Missing 'text' in request body".to_string(),
        ));
    };
    if text.is_empty() {
        return Err(OrganizeError::Input(
            "Missing 'text' in request body".to_string(),
        ));
    }

    let songs = utils::parse_text_songs(&text);
    let grouping = organize::organize_songs(songs, state.model.as_ref()).await;

    Ok(Json(grouping))
}
