use std::path::PathBuf;

use super::{spinner, write_grouping};
use crate::{
    Res,
    config::Config,
    gemini::GeminiClient,
    info,
    management::GenreCache,
    organize::{self, GenreResolver, PlaylistSource},
    spotify::SpotifyClient,
    success, utils,
};

/// Organizes the playlist at `link` (or `SPOTIFY_PLAYLIST_LINK`) by genre and
/// writes the result to `output` (default `organized_playlist.txt`).
pub async fn organize(config: &Config, link: Option<String>, output: Option<PathBuf>) -> Res<()> {
    let link = config.playlist_link(link)?;
    let Some(playlist_id) = utils::get_playlist_id(&link) else {
        return Err(format!("Invalid Spotify playlist link: {}", link).into());
    };

    let spotify = SpotifyClient::new(config)?;
    let gemini = GeminiClient::new(config)?;
    let resolver = GenreResolver::new(config.artist_lookup_delay);
    let mut cache = GenreCache::new();

    let pb = spinner("Fetching playlist tracks...");
    let items = spotify.playlist_tracks(playlist_id).await;
    pb.finish_and_clear();
    let items = items?;
    info!("Fetched {} playlist items from {}", items.len(), playlist_id);

    let grouping =
        organize::organize_tracks(&items, &mut cache, &spotify, &gemini, &resolver).await;
    info!("Looked up genres for {} artists", cache.len());

    let path = write_grouping(&grouping, output).await?;
    success!(
        "Playlist organized into {} genres (including Gemini classifications) and saved to '{}'",
        grouping.len(),
        path.display()
    );

    Ok(())
}
