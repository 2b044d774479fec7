//! Init command - write the default configuration and create storage.

use crate::cli::Output;
use crate::config::{Settings, StorageProvider};
use crate::store::LocalContentStore;

/// Initialize configuration, data directory and the local media bucket.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Teinte Init");

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config already exists at {}", config_path.display()));
    } else {
        settings.save_to(&config_path)?;
        Output::success(&format!("Wrote default config to {}", config_path.display()));
    }

    std::fs::create_dir_all(settings.data_dir())?;
    Output::success(&format!("Data directory: {}", settings.data_dir().display()));

    match settings.storage.provider {
        StorageProvider::Local => {
            let store = LocalContentStore::new(settings.media_dir(), &settings.storage.bucket);
            store.ensure_bucket()?;
            Output::success(&format!(
                "Media bucket '{}' ready under {}",
                settings.storage.bucket,
                settings.media_dir().display()
            ));
        }
        StorageProvider::Supabase => {
            // Bucket provisioning stays outside this tool; we only verify it
            // later in doctor/pitch preflight.
            Output::info(&format!(
                "Supabase provider configured; ensure bucket '{}' exists and is public",
                settings.storage.bucket
            ));
        }
    }

    Output::info("Run 'teinte doctor' to verify the setup.");
    Ok(())
}
