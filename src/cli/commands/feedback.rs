//! Feedback command - record free-form user feedback.

use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::CoachPipeline;
use crate::profile::Profile;
use crate::session::Session;
use std::str::FromStr;

/// Record a feedback entry, optionally tied to a profile.
pub async fn run_feedback(
    content: &str,
    profile: Option<String>,
    settings: Settings,
) -> anyhow::Result<()> {
    let pipeline = CoachPipeline::new(settings)?;

    let mut session = Session::new();
    if let Some(p) = profile.as_deref() {
        let parsed = Profile::from_str(p).map_err(crate::error::TeinteError::Validation)?;
        session.override_profile(parsed);
    }

    pipeline.record_feedback(&session, content).await?;
    Output::success("Merci, votre retour est enregistré.");
    Ok(())
}
