//! # CLI Module
//!
//! Command implementations of the `genresort` binary.
//!
//! ## Commands
//!
//! - [`organize`] - fetch a Spotify playlist, group it by genre and write the
//!   organized file
//! - [`text`] - group a pasted song list (file or stdin) by genre using only
//!   the model
//! - [`serve`] - run the HTTP service
//!
//! ## Output
//!
//! Both organize commands write the same text format (see
//! [`crate::utils::render_grouping`]) and print a table with the number of
//! songs per genre. Progress goes through the `info!`/`success!`/`warning!`
//! macros; network waits show a spinner.
//!
//! ## Usage
//!
//! ```bash
//! genresort organize                                  # link from SPOTIFY_PLAYLIST_LINK
//! genresort organize --link https://open.spotify.com/playlist/abc --output rock.txt
//! genresort text songs.txt                            # "Song - Artist" per line
//! pbpaste | genresort text
//! genresort serve --address 0.0.0.0:5000
//! ```

use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{Res, config::DEFAULT_OUTPUT_FILE, types::GenreGrouping, utils};

mod organize;
mod serve;
mod text;

pub use organize::organize;
pub use serve::serve;
pub use text::text;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Writes the organized file and prints the per-genre summary. Returns the
/// path written to.
async fn write_grouping(grouping: &GenreGrouping, output: Option<PathBuf>) -> Res<PathBuf> {
    let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent).await?;
    }
    async_fs::write(&path, utils::render_grouping(grouping)).await?;

    if !grouping.is_empty() {
        println!("{}", Table::new(utils::genre_table_rows(grouping)));
    }

    Ok(path)
}
