//! Speech-to-text transcription of pitch uploads.

mod whisper;

pub use whisper::WhisperTranscriber;

use crate::error::Result;
use crate::media::MediaKind;
use async_trait::async_trait;
use std::path::Path;

/// Trait for transcription implementations.
///
/// Takes a media file of a declared kind and produces a plain-text
/// transcript in the configured target language. Video inputs get their
/// audio track extracted first; any temporary artifact that step creates is
/// cleaned up on every exit path.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, media_path: &Path, kind: MediaKind) -> Result<String>;
}
