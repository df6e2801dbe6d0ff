use super::SpotifyClient;
use crate::{
    error::OrganizeError,
    types::{PlaylistItem, PlaylistTracksPage},
};

/// Page size of the playlist items endpoint (the API maximum).
pub const PAGE_LIMIT: u32 = 100;

/// Retrieves every item of a playlist.
///
/// Requests the first page of `/playlists/{id}/tracks` and keeps following the
/// absolute `next` URL until the API reports no further page. Items are
/// returned in playlist order, including entries whose `track` is `null`.
///
/// # Errors
///
/// Any failed page aborts the whole fetch with an
/// [`OrganizeError::Upstream`]; a partial playlist is never returned.
pub async fn get_playlist_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
) -> Result<Vec<PlaylistItem>, OrganizeError> {
    let mut items: Vec<PlaylistItem> = Vec::new();
    let mut next = Some(format!(
        "{uri}/playlists/{id}/tracks?limit={limit}",
        uri = client.api_url(),
        id = playlist_id,
        limit = PAGE_LIMIT
    ));

    while let Some(url) = next {
        let page = client.get_json::<PlaylistTracksPage>(&url).await?;
        items.extend(page.items);
        next = page.next;
    }

    Ok(items)
}
