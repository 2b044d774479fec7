//! Pre-flight checks run before expensive pipeline operations.
//!
//! Catching a missing tool or API key here means the user never waits on an
//! upload or transcription that was doomed from the start.

use crate::error::{Result, TeinteError};
use std::process::Command;

/// What the upcoming operation needs from the environment.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Pitch processing: API key, plus ffmpeg for video uploads.
    Pitch,
    /// Chat and indexing: API key only.
    Chat,
}

/// Verify the environment can support `operation`.
pub fn check(operation: Operation) -> Result<()> {
    require_api_key()?;
    if matches!(operation, Operation::Pitch) {
        require_ffmpeg()?;
    }
    Ok(())
}

fn require_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()) {
        Some(_) => Ok(()),
        None => Err(TeinteError::Config(
            "OPENAI_API_KEY is not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

fn require_ffmpeg() -> Result<()> {
    match Command::new("ffmpeg").arg("-version").output() {
        Ok(out) if out.status.success() => Ok(()),
        Ok(_) => Err(TeinteError::Config(
            "ffmpeg is installed but not working correctly".to_string(),
        )),
        Err(_) => Err(TeinteError::Config(
            "ffmpeg not found. Install it and ensure it's on your PATH.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_is_fatal() {
        // The variable may or may not be set in the environment running the
        // tests; only assert the error classification when it is absent.
        if std::env::var("OPENAI_API_KEY").is_err() {
            let err = require_api_key().unwrap_err();
            assert!(matches!(err, TeinteError::Config(_)));
            assert!(!err.is_recoverable());
        }
    }
}
