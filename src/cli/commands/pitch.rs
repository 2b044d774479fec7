//! Pitch command - process an upload and detect the DISC profile.

use crate::cli::commands::chat::chat_loop;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::{CoachPipeline, PitchUpload};
use crate::session::Session;
use console::style;
use std::path::Path;

/// Process a pitch file: transcribe, classify, persist; optionally chat.
pub async fn run_pitch(file: &str, chat: bool, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Pitch) {
        Output::error(&format!("{}", e));
        Output::info("Run 'teinte doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let pipeline = CoachPipeline::new(settings)?;
    let mut session = Session::new();

    let upload = PitchUpload::from_file(Path::new(file))?;
    Output::info(&format!(
        "Processing pitch '{}' ({} bytes)",
        upload.file_name,
        upload.size_bytes()
    ));

    let spinner = Output::spinner("Transcription et analyse du profil...");
    let result = pipeline.process_pitch(&mut session, upload).await;
    spinner.finish_and_clear();

    let outcome = match result {
        Ok(o) => o,
        Err(e) => {
            Output::error(&format!("{}", e));
            if e.is_recoverable() {
                Output::info("Corrigez l'entrée ou réessayez.");
            }
            return Err(e.into());
        }
    };

    Output::success(&format!(
        "Profil détecté : {}",
        style(outcome.classification.profile.to_string()).bold()
    ));
    println!();
    for (profile, score) in outcome.classification.scores.iter() {
        Output::kv(profile.as_str(), &score.to_string());
    }
    println!();
    Output::kv("Transcription", &outcome.transcription);
    Output::kv("Media", &outcome.video_url);

    if chat {
        chat_loop(&pipeline, &mut session).await?;
    }

    Ok(())
}
