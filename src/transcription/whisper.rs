//! OpenAI Whisper transcription implementation.

use super::Transcriber;
use crate::error::{Result, TeinteError};
use crate::media::{extract_audio, MediaKind};
use crate::openai::create_client;
use async_openai::types::{AudioResponseFormat, CreateTranscriptionRequestArgs};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, instrument};

/// OpenAI Whisper-based transcriber.
pub struct WhisperTranscriber {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    language: String,
}

impl WhisperTranscriber {
    /// Create a new Whisper transcriber with default settings (French).
    pub fn new() -> Self {
        Self::with_config("whisper-1", "fr")
    }

    /// Create a new Whisper transcriber with custom model and language hint.
    pub fn with_config(model: &str, language: &str) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            language: language.to_string(),
        }
    }

    /// Send one audio file to the transcription API.
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe_audio(&self, audio_path: &Path) -> Result<String> {
        debug!("Transcribing audio file");

        let file_bytes = tokio::fs::read(audio_path).await?;

        let request = CreateTranscriptionRequestArgs::default()
            .file(async_openai::types::AudioInput::from_vec_u8(
                audio_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("audio.wav")
                    .to_string(),
                file_bytes,
            ))
            .model(&self.model)
            .language(&self.language)
            .response_format(AudioResponseFormat::Json)
            .build()
            .map_err(|e| TeinteError::Transcription(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe(request)
            .await
            .map_err(|e| TeinteError::Transcription(format!("Whisper API error: {}", e)))?;

        Ok(response.text.trim().to_string())
    }
}

impl Default for WhisperTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    #[instrument(skip(self), fields(media_path = %media_path.display()))]
    async fn transcribe(&self, media_path: &Path, kind: MediaKind) -> Result<String> {
        match kind {
            MediaKind::Audio => self.transcribe_audio(media_path).await,
            MediaKind::Video => {
                // TempDir removes the extracted track on success and on error.
                let temp_dir = tempfile::tempdir()?;
                let audio_path = temp_dir.path().join("audio.wav");
                extract_audio(media_path, &audio_path).await?;
                let text = self.transcribe_audio(&audio_path).await?;
                drop(temp_dir);
                Ok(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcriber_configuration() {
        let t = WhisperTranscriber::with_config("whisper-1", "fr");
        assert_eq!(t.model, "whisper-1");
        assert_eq!(t.language, "fr");
    }
}
