//! Index command - seed the profile-scoped knowledge base.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::CoachPipeline;
use crate::profile::Profile;
use std::str::FromStr;

/// Embed and index coaching material for one profile.
pub async fn run_index(
    file: &str,
    profile: &str,
    title: &str,
    settings: Settings,
) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Chat) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let profile = Profile::from_str(profile).map_err(crate::error::TeinteError::Validation)?;
    let text = std::fs::read_to_string(file)?;

    let pipeline = CoachPipeline::new(settings)?;

    let spinner = Output::spinner("Indexing coaching material...");
    let count = pipeline.seed_context(profile, title, &text).await?;
    spinner.finish_and_clear();

    Output::success(&format!(
        "Indexed {} passage(s) for profile {}",
        count, profile
    ));
    Ok(())
}
