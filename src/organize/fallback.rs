use std::collections::HashMap;

use super::TextModel;
use crate::{types::UnresolvedSong, warning};

const PROMPT_HEADER: &str = "Classify the genre for the following songs. Provide the genre for each song in the format 'Song Name - Artist(s): Genre'.";
const PROMPT_FOOTER: &str = "Genres:";

/// Builds the single prompt listing every unresolved song, one per line, in
/// input order.
pub fn build_prompt(songs: &[UnresolvedSong]) -> String {
    let body = songs
        .iter()
        .map(UnresolvedSong::prompt_line)
        .collect::<Vec<String>>()
        .join("\n");

    format!("{}\n\n{}\n\n{}", PROMPT_HEADER, body, PROMPT_FOOTER)
}

/// Parses the model reply into `"Song - Artists"` → genre.
///
/// Every line holding `": "` is split at its first occurrence and both halves
/// are trimmed; other lines are ignored. A label seen twice keeps the last
/// genre.
pub fn parse_classifications(reply: &str) -> HashMap<String, String> {
    let mut classifications = HashMap::new();
    for line in reply.trim().split('\n') {
        if let Some((song, genre)) = line.split_once(": ") {
            classifications.insert(song.trim().to_string(), genre.trim().to_string());
        }
    }
    classifications
}

/// Classifies all `songs` with one model call.
///
/// Returns an empty map without calling the model when `songs` is empty. A
/// failed call or an empty reply also yields an empty map: classification
/// never fails the caller, it only leaves songs unclassified. Callers match
/// songs against the keys by exact display name.
pub async fn classify_unresolved(
    model: &dyn TextModel,
    songs: &[UnresolvedSong],
) -> HashMap<String, String> {
    if songs.is_empty() {
        return HashMap::new();
    }

    let prompt = build_prompt(songs);
    match model.complete(&prompt).await {
        Ok(Some(reply)) => parse_classifications(&reply),
        Ok(None) => {
            warning!("Gemini returned no text for {} songs", songs.len());
            HashMap::new()
        }
        Err(e) => {
            warning!("Error classifying with Gemini (batched): {}", e);
            HashMap::new()
        }
    }
}
