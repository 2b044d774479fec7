//! Teinte CLI entry point.

use anyhow::Result;
use clap::Parser;
use teinte::cli::{commands, Cli, Commands};
use teinte::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("teinte={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure the data directory exists
    std::fs::create_dir_all(settings.data_dir())?;

    // Execute command
    match &cli.command {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings).await?;
        }

        Commands::Pitch { file, chat } => {
            commands::run_pitch(file, *chat, settings).await?;
        }

        Commands::Chat { profile } => {
            commands::run_chat(profile.clone(), settings).await?;
        }

        Commands::Index {
            file,
            profile,
            title,
        } => {
            commands::run_index(file, profile, title, settings).await?;
        }

        Commands::Feedback { content, profile } => {
            commands::run_feedback(content, profile.clone(), settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
