//! Configuration settings for Teinte.

use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub upload: UploadSettings,
    pub transcription: TranscriptionSettings,
    pub embedding: EmbeddingSettings,
    pub retrieval: RetrievalSettings,
    pub generation: GenerationSettings,
    pub storage: StorageSettings,
    pub database: DatabaseSettings,
    /// Per-profile weighted keyword tables for classification.
    pub lexicon: Lexicon,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.teinte".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Upload validation policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Accepted file extensions (lowercase, without dot).
    pub allowed_extensions: Vec<String>,
    /// Maximum upload size in bytes.
    pub max_bytes: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            allowed_extensions: ["mp4", "mov", "m4a", "wav", "flac", "mp3"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_bytes: 50 * 1024 * 1024, // 50MB
        }
    }
}

/// Transcription service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Whisper model to use.
    pub model: String,
    /// Target transcription language hint (ISO 639-1).
    pub language: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model: "whisper-1".to_string(),
            language: "fr".to_string(),
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Context retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Maximum number of context snippets per chat turn.
    pub max_snippets: usize,
    /// Minimum cosine similarity for a snippet to qualify.
    pub min_score: f32,
    /// Policy switch: when retrieval itself fails, proceed with an empty
    /// context instead of failing the chat turn.
    pub continue_without_context: bool,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            max_snippets: 3,
            min_score: 0.75,
            continue_without_context: true,
        }
    }
}

/// Response generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// LLM model for response generation.
    pub model: String,
    /// Temperature for red, green and blue profiles.
    pub base_temperature: f32,
    /// Temperature for the yellow profile (higher creativity dial).
    pub creative_temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4-turbo".to_string(),
            base_temperature: 0.4,
            creative_temperature: 0.7,
        }
    }
}

/// Content store provider type.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    /// Local directory store (default).
    #[default]
    Local,
    /// Supabase Storage bucket over HTTP.
    Supabase,
}

impl std::fmt::Display for StorageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageProvider::Local => write!(f, "local"),
            StorageProvider::Supabase => write!(f, "supabase"),
        }
    }
}

/// Media content store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Content store provider (local, supabase).
    pub provider: StorageProvider,
    /// Bucket or namespace for uploaded pitch media.
    pub bucket: String,
    /// Directory backing the local provider.
    pub local_dir: String,
    /// Base URL of the Supabase project (for the supabase provider).
    pub supabase_url: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProvider::Local,
            bucket: "pitch-videos".to_string(),
            local_dir: "~/.teinte/media".to_string(),
            supabase_url: None,
        }
    }
}

/// SQLite database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Path to the SQLite database.
    pub sqlite_path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            sqlite_path: "~/.teinte/coach.db".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TeinteError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("teinte")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded SQLite database path.
    pub fn sqlite_path(&self) -> PathBuf {
        Self::expand_path(&self.database.sqlite_path)
    }

    /// Get the expanded local media store directory.
    pub fn media_dir(&self) -> PathBuf {
        Self::expand_path(&self.storage.local_dir)
    }
}
