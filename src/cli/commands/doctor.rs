//! Doctor command - diagnose the environment before coaching sessions.

use crate::cli::Output;
use crate::config::{Settings, StorageProvider};
use crate::store::{ContentStore, LocalContentStore, SupabaseContentStore};
use console::style;
use std::process::Command;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Verdict {
    Pass,
    Warn,
    Fail,
}

/// One diagnostic line: what was checked, how it went, what to do about it.
struct Check {
    label: &'static str,
    verdict: Verdict,
    detail: String,
    hint: Option<&'static str>,
}

impl Check {
    fn pass(label: &'static str, detail: impl Into<String>) -> Self {
        Self {
            label,
            verdict: Verdict::Pass,
            detail: detail.into(),
            hint: None,
        }
    }

    fn warn(label: &'static str, detail: impl Into<String>, hint: &'static str) -> Self {
        Self {
            label,
            verdict: Verdict::Warn,
            detail: detail.into(),
            hint: Some(hint),
        }
    }

    fn fail(label: &'static str, detail: impl Into<String>, hint: &'static str) -> Self {
        Self {
            label,
            verdict: Verdict::Fail,
            detail: detail.into(),
            hint: Some(hint),
        }
    }

    fn print(&self) {
        let mark = match self.verdict {
            Verdict::Pass => style("✔").green(),
            Verdict::Warn => style("!").yellow(),
            Verdict::Fail => style("✗").red(),
        };
        println!("  {} {} — {}", mark, style(self.label).bold(), self.detail);
        if let Some(hint) = self.hint {
            println!("      {}", style(hint).dim());
        }
    }
}

/// Run every diagnostic and exit non-zero when something is broken.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Teinte Doctor");

    let checks = vec![
        check_ffmpeg(),
        check_api_key(),
        check_media_bucket(settings).await,
        check_database(settings),
        check_config_file(),
    ];

    println!();
    for check in &checks {
        check.print();
    }
    println!();

    let failures = checks.iter().filter(|c| c.verdict == Verdict::Fail).count();
    let warnings = checks.iter().filter(|c| c.verdict == Verdict::Warn).count();

    if failures > 0 {
        Output::error(&format!("{failures} problem(s) must be fixed before use."));
        std::process::exit(1);
    }
    if warnings > 0 {
        Output::warning(&format!("Ready, with {warnings} warning(s)."));
    } else {
        Output::success("Everything looks good.");
    }
    Ok(())
}

fn check_ffmpeg() -> Check {
    let hint = if cfg!(target_os = "macos") {
        "Install with: brew install ffmpeg"
    } else {
        "Install ffmpeg via your package manager"
    };

    match Command::new("ffmpeg").arg("-version").output() {
        Ok(out) if out.status.success() => {
            let banner = String::from_utf8_lossy(&out.stdout);
            let first = banner.lines().next().unwrap_or("installed").trim();
            Check::pass("ffmpeg", first.chars().take(50).collect::<String>())
        }
        Ok(_) => Check::fail("ffmpeg", "installed but not working", hint),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Check::fail("ffmpeg", "not found on PATH", hint)
        }
        Err(e) => Check::fail("ffmpeg", e.to_string(), hint),
    }
}

fn check_api_key() -> Check {
    const HINT: &str = "Set with: export OPENAI_API_KEY='sk-...'";
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if key.starts_with("sk-") && key.len() > 20 => {
            Check::pass("OPENAI_API_KEY", format!("configured ({})", mask_key(&key)))
        }
        Ok(key) if key.is_empty() => Check::fail("OPENAI_API_KEY", "set but empty", HINT),
        Ok(_) => Check::warn("OPENAI_API_KEY", "set but format looks unusual", HINT),
        Err(_) => Check::fail("OPENAI_API_KEY", "not set", HINT),
    }
}

/// Show just enough of the key to recognize it. Indexes by character, so an
/// unusual key with multi-byte content cannot split a char boundary.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let head: String = chars.iter().take(7).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{head}…{tail}")
}

async fn check_media_bucket(settings: &Settings) -> Check {
    let bucket = &settings.storage.bucket;
    let exists = match settings.storage.provider {
        StorageProvider::Local => {
            LocalContentStore::new(settings.media_dir(), bucket)
                .namespace_exists()
                .await
        }
        StorageProvider::Supabase => {
            let Some(url) = settings.storage.supabase_url.as_deref() else {
                return Check::fail(
                    "Media bucket",
                    "storage.supabase_url not configured",
                    "Set storage.supabase_url in the config file",
                );
            };
            match SupabaseContentStore::new(url, bucket) {
                Ok(store) => store.namespace_exists().await,
                Err(e) => {
                    return Check::fail(
                        "Media bucket",
                        e.to_string(),
                        "Set SUPABASE_KEY and storage.supabase_url",
                    )
                }
            }
        }
    };

    match exists {
        Ok(true) => Check::pass(
            "Media bucket",
            format!("'{}' ({})", bucket, settings.storage.provider),
        ),
        Ok(false) => Check::fail(
            "Media bucket",
            format!("'{bucket}' does not exist"),
            "Run 'teinte init' (local) or create the bucket in Supabase",
        ),
        Err(e) => Check::fail(
            "Media bucket",
            format!("check failed: {e}"),
            "Verify storage configuration and credentials",
        ),
    }
}

fn check_database(settings: &Settings) -> Check {
    let path = settings.sqlite_path();
    if path.exists() {
        Check::pass("Database", path.display().to_string())
    } else {
        Check::warn(
            "Database",
            format!("{} (not created yet)", path.display()),
            "Created automatically on first use",
        )
    }
}

fn check_config_file() -> Check {
    let path = Settings::default_config_path();
    if path.exists() {
        Check::pass("Config file", path.display().to_string())
    } else {
        Check::warn("Config file", "using built-in defaults", "Create with: teinte init")
    }
}
