use super::SpotifyClient;
use crate::{error::OrganizeError, types::ArtistResponse};

/// Retrieves the genre tags Spotify attaches to an artist.
///
/// An artist without genres yields an empty list, not an error.
pub async fn get_artist_genres(
    client: &SpotifyClient,
    artist_id: &str,
) -> Result<Vec<String>, OrganizeError> {
    let api_url = format!(
        "{uri}/artists/{id}",
        uri = client.api_url(),
        id = artist_id
    );

    let artist = client.get_json::<ArtistResponse>(&api_url).await?;
    Ok(artist.genres)
}
