//! Playlist Genre Organizer Library
//!
//! This library fetches the tracks of a Spotify playlist, looks up a genre for
//! every track through its artists, asks a Gemini text model to classify the
//! tracks whose artists carry no genre, and groups everything by genre. The same
//! pipeline backs the command-line batch job and the small HTTP service.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the organize endpoints
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by the pipeline and its entry points
//! - `gemini` - Gemini text model client used for fallback classification
//! - `management` - In-memory artist genre cache
//! - `organize` - Genre resolution, fallback classification and grouping
//! - `server` - HTTP server wiring
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Link parsing, raw text parsing and output rendering
//!
//! # Example
//!
//! ```
//! use genresort::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> genresort::Res<()> {
//!     config::load_env().await?;
//!     let cfg = config::Config::from_env()?;
//!     cli::organize(&cfg, None, None).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod management;
pub mod organize;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the command-line glue where any error simply ends the run with a
/// message. The pipeline itself returns [`error::OrganizeError`].
///
/// # Example
///
/// ```
/// use genresort::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist tracks...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist organized into {} genres", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used for fatal startup failures such as missing credentials. Code
/// after this macro does not execute.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for degraded but recoverable paths: a failed artist lookup, a failed
/// or empty model classification, a retried upstream request.
///
/// # Example
///
/// ```
/// warning!("Failed to fetch genres for artist {}: {}", id, err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
