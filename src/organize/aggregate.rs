use super::{
    ArtistGenreSource, GenreResolver, Resolution, TextModel, UNKNOWN_GENRE,
    fallback::classify_unresolved,
};
use crate::{
    info,
    management::GenreCache,
    types::{GenreGrouping, PlaylistItem, UnresolvedSong},
};

/// Bucket for playlist tracks that neither artist metadata nor the model
/// could classify.
pub const PLAYLIST_CATCH_ALL: &str = "Unknown (Unclassified by Gemini)";

/// Bucket for pasted songs the model did not classify.
pub const TEXT_CATCH_ALL: &str = "Unknown (Text Input)";

/// Groups playlist tracks by genre.
///
/// Tracks are resolved through their artists first, in playlist order. All
/// tracks left unresolved are then sent to the model in one batch; a track
/// whose exact display name comes back classified joins that genre, every
/// other one lands in [`PLAYLIST_CATCH_ALL`], which is always the last group.
/// Items without a track are skipped.
pub async fn organize_tracks(
    items: &[PlaylistItem],
    cache: &mut GenreCache,
    artists: &dyn ArtistGenreSource,
    model: &dyn TextModel,
    resolver: &GenreResolver,
) -> GenreGrouping {
    let (grouping, unresolved) = resolve_tracks(items, cache, artists, resolver).await;
    classify_tracks(grouping, unresolved, model).await
}

/// First half of [`organize_tracks`]: the artist pass, the only part that
/// needs the cache. Returns the grouping of resolved tracks and the tracks
/// left for the model, both in playlist order.
pub async fn resolve_tracks(
    items: &[PlaylistItem],
    cache: &mut GenreCache,
    artists: &dyn ArtistGenreSource,
    resolver: &GenreResolver,
) -> (GenreGrouping, Vec<UnresolvedSong>) {
    let mut grouping = GenreGrouping::new();
    let mut unresolved: Vec<UnresolvedSong> = Vec::new();

    for item in items {
        let Some(track) = &item.track else {
            continue;
        };

        let artist_names = track.artist_names();
        match resolver.resolve(cache, artists, &track.artists).await {
            Resolution::Unresolved => {
                unresolved.push(UnresolvedSong::new(&track.name, &artist_names));
            }
            resolved => {
                grouping.push(
                    resolved.label(),
                    format!("{} - {}", track.name, artist_names),
                );
            }
        }
    }

    (grouping, unresolved)
}

/// Second half of [`organize_tracks`]: one model call for the tracks the
/// artist pass left unresolved.
pub async fn classify_tracks(
    mut grouping: GenreGrouping,
    unresolved: Vec<UnresolvedSong>,
    model: &dyn TextModel,
) -> GenreGrouping {
    if !unresolved.is_empty() {
        info!(
            "Classifying {} songs with '{}' genre using Gemini...",
            unresolved.len(),
            UNKNOWN_GENRE
        );
    }
    apply_classifications(&mut grouping, model, unresolved, PLAYLIST_CATCH_ALL).await;

    grouping
}

/// Groups pasted songs by genre using only the model, since raw text carries
/// no artist ids. Unclassified songs land in [`TEXT_CATCH_ALL`].
pub async fn organize_songs(songs: Vec<UnresolvedSong>, model: &dyn TextModel) -> GenreGrouping {
    let mut grouping = GenreGrouping::new();
    apply_classifications(&mut grouping, model, songs, TEXT_CATCH_ALL).await;
    grouping
}

async fn apply_classifications(
    grouping: &mut GenreGrouping,
    model: &dyn TextModel,
    songs: Vec<UnresolvedSong>,
    catch_all: &str,
) {
    let classifications = classify_unresolved(model, &songs).await;

    let mut unclassified: Vec<String> = Vec::new();
    for song in songs {
        match classifications.get(&song.display_name) {
            Some(genre) => {
                info!("Gemini classified '{}' as '{}'", song.display_name, genre);
                grouping.push(genre, song.display_name);
            }
            None => unclassified.push(song.display_name),
        }
    }

    for song in unclassified {
        grouping.push(catch_all, song);
    }
}
