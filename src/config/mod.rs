//! Configuration management for Teinte.

mod settings;

pub use settings::{
    DatabaseSettings, EmbeddingSettings, GeneralSettings, GenerationSettings, RetrievalSettings,
    Settings, StorageProvider, StorageSettings, TranscriptionSettings, UploadSettings,
};
