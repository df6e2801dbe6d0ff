use std::path::PathBuf;

use tokio::io::AsyncReadExt;

use super::write_grouping;
use crate::{Res, config::Config, gemini::GeminiClient, info, organize, success, utils};

/// Organizes a pasted song list, one `Song - Artist` per line, read from
/// `file` or from stdin when no file is given.
pub async fn text(config: &Config, file: Option<PathBuf>, output: Option<PathBuf>) -> Res<()> {
    let input = match file {
        Some(path) => async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let songs = utils::parse_text_songs(&input);
    if songs.is_empty() {
        return Err("No songs found in the input".into());
    }

    let gemini = GeminiClient::new(config)?;
    let count = songs.len();
    info!("Classifying {} songs with {}...", count, gemini.model());
    let grouping = organize::organize_songs(songs, &gemini).await;

    let path = write_grouping(&grouping, output).await?;
    success!(
        "{} songs organized into {} genres and saved to '{}'",
        count,
        grouping.len(),
        path.display()
    );

    Ok(())
}
