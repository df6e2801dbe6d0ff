use thiserror::Error;

/// Errors produced while organizing tracks by genre.
///
/// The variants follow how a failure is surfaced:
/// - `Input` - bad or missing caller input, reported as a 4xx and never retried
/// - `Upstream` - the playlist source or the artist source failed
/// - `Classification` - the text model call failed; never leaves the fallback pipeline
/// - `Config` - a required setting is missing or malformed at startup
/// - `Io` - reading input or writing the output file failed
#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("{0}")]
    Input(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("classification failed: {0}")]
    Classification(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for OrganizeError {
    fn from(err: reqwest::Error) -> Self {
        OrganizeError::Upstream(err.to_string())
    }
}
