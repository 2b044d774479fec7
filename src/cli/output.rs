//! Terminal output helpers for the coaching CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Namespaced print helpers so every command speaks with one voice.
pub struct Output;

impl Output {
    pub fn info(msg: &str) {
        println!("{} {}", style("·").cyan(), msg);
    }

    pub fn success(msg: &str) {
        println!("{} {}", style("✔").green().bold(), msg);
    }

    pub fn warning(msg: &str) {
        eprintln!("{} {}", style("!").yellow().bold(), msg);
    }

    pub fn error(msg: &str) {
        eprintln!("{} {}", style("✗").red().bold(), msg);
    }

    /// Section header for multi-part command output.
    pub fn header(title: &str) {
        println!("\n{}", style(title).bold().underlined());
    }

    /// Aligned label/value line.
    pub fn kv(label: &str, value: &str) {
        println!("  {} {}", style(format!("{label}:")).dim(), value);
    }

    /// Spinner shown while a pipeline stage runs; callers clear it before
    /// printing results.
    pub fn spinner(msg: &str) -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        if let Ok(tpl) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(tpl);
        }
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }
}
