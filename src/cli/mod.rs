//! CLI module for Teinte.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Teinte - DISC 4Colors pitch coaching
///
/// Analyzes a voice or video pitch to infer a DISC 4Colors behavioral
/// profile, then holds a profile-styled coaching chat grounded in a
/// profile-scoped knowledge base. "Teinte" is French for "tint."
#[derive(Parser, Debug)]
#[command(name = "teinte")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Teinte: write the default config and create storage
    Init,

    /// Check system requirements and configuration
    Doctor,

    /// Process a pitch recording and detect the DISC profile
    Pitch {
        /// Local audio/video file path (mp4, mov, m4a, wav, flac, mp3)
        file: String,

        /// Start a coaching chat right after processing
        #[arg(long)]
        chat: bool,
    },

    /// Start an interactive coaching chat session
    Chat {
        /// Profile to use (rouge, jaune, vert, bleu); required unless a
        /// pitch was processed in the same invocation
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Seed the knowledge base with coaching material for a profile
    Index {
        /// Text file with passages separated by blank lines
        file: String,

        /// Profile to tag the material with (rouge, jaune, vert, bleu)
        #[arg(short, long)]
        profile: String,

        /// Source title stored with each passage
        #[arg(short, long, default_value = "Coaching material")]
        title: String,
    },

    /// Record free-form feedback
    Feedback {
        /// Feedback text
        content: String,

        /// Profile the feedback relates to (optional)
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
