//! Error types for Teinte.

use thiserror::Error;

/// Library-level error type for Teinte operations.
///
/// Variants map onto the recovery taxonomy: configuration problems are fatal
/// and reported before any work starts, upload validation and media problems
/// ask the user for a corrected input, service failures are retryable, and
/// persistence failures trigger rollback of any paired media object.
#[derive(Error, Debug)]
pub enum TeinteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid upload: {0}")]
    Validation(String),

    #[error("Unsupported media format: {0}")]
    UnsupportedFormat(String),

    #[error("Audio extraction failed: {0}")]
    MediaDecode(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Context retrieval failed: {0}")]
    Retrieval(String),

    #[error("Response generation failed: {0}")]
    Generation(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl TeinteError {
    /// Whether the user can recover by retrying or correcting their input.
    ///
    /// Only configuration errors are fatal; everything else leaves the
    /// session usable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, TeinteError::Config(_))
    }
}

/// Result type alias for Teinte operations.
pub type Result<T> = std::result::Result<T, TeinteError>;
