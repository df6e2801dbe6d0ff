use crate::types::{GenreGrouping, GenreTableRow, UnresolvedSong};

/// Extracts the playlist id from a share link: the last `/` segment with any
/// query string removed. Returns `None` when nothing is left.
pub fn get_playlist_id(link: &str) -> Option<&str> {
    let last_segment = link.trim().rsplit('/').next().unwrap_or_default();
    let id = last_segment.split('?').next().unwrap_or_default();

    if id.is_empty() { None } else { Some(id) }
}

/// Turns pasted text into songs, one per non-blank line.
///
/// A line made of exactly two parts around `" - "` is read as
/// `name - artists`; any other line is taken whole as the song name.
pub fn parse_text_songs(text: &str) -> Vec<UnresolvedSong> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let parts: Vec<&str> = line.split(" - ").collect();
            match parts.as_slice() {
                [name, artists] => UnresolvedSong::from_text(name.trim(), artists.trim()),
                _ => UnresolvedSong::from_text(line, ""),
            }
        })
        .collect()
}

/// Renders a grouping in the organized-playlist file format: every genre
/// starts with a blank line and a `## GENRE ##` header, followed by one song
/// per line.
pub fn render_grouping(grouping: &GenreGrouping) -> String {
    let mut out = String::new();
    for (genre, songs) in grouping.iter() {
        out.push_str(&format!("\n## {} ##\n", genre.to_uppercase()));
        for song in songs {
            out.push_str(song);
            out.push('\n');
        }
    }
    out
}

pub fn genre_table_rows(grouping: &GenreGrouping) -> Vec<GenreTableRow> {
    grouping
        .iter()
        .map(|(genre, songs)| GenreTableRow {
            genre: genre.clone(),
            songs: songs.len(),
        })
        .collect()
}
