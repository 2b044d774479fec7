//! Config command - show configuration.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;

/// Show the active configuration or its file path.
pub fn run_config(action: &ConfigAction, settings: Settings) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&settings)?;
            println!("{}", content);
        }
        ConfigAction::Path => {
            Output::kv(
                "Config path",
                &Settings::default_config_path().display().to_string(),
            );
        }
    }
    Ok(())
}
