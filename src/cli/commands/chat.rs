//! Interactive coaching chat command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::CoachPipeline;
use crate::profile::Profile;
use crate::session::Session;
use console::style;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Run the interactive chat command.
pub async fn run_chat(profile: Option<String>, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Chat) {
        Output::error(&format!("{}", e));
        Output::info("Run 'teinte doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let pipeline = CoachPipeline::new(settings)?;
    let mut session = Session::new();

    match profile.as_deref() {
        Some(p) => {
            let parsed = Profile::from_str(p).map_err(crate::error::TeinteError::Validation)?;
            session.override_profile(parsed);
        }
        None => {
            Output::error("No profile selected.");
            Output::info("Use --profile (rouge, jaune, vert, bleu) or run 'teinte pitch <file> --chat'.");
            return Ok(());
        }
    }

    chat_loop(&pipeline, &mut session).await
}

/// Interactive loop over one session. Shared with `pitch --chat`.
pub async fn chat_loop(pipeline: &CoachPipeline, session: &mut Session) -> anyhow::Result<()> {
    let Some(profile) = session.profile() else {
        Output::error("No profile selected.");
        return Ok(());
    };

    println!("\n{}", style("Julia - Coach DISC 4Colors").bold().cyan());
    println!("{}", style(format!("Profil actif : {}", profile)).dim());
    println!(
        "{}\n",
        style("Posez vos questions. 'profil <couleur>' change le profil, 'exit' quitte.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("Vous:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("À bientôt !");
            break;
        }

        // Manual profile override, mirroring the profile selector of the UI.
        if let Some(rest) = input.strip_prefix("profil ") {
            match Profile::from_str(rest.trim()) {
                Ok(p) => {
                    session.override_profile(p);
                    Output::success(&format!("Profil mis à jour : {}", p));
                }
                Err(e) => Output::error(&e),
            }
            continue;
        }

        let spinner = Output::spinner("Julia réfléchit...");
        let result = pipeline.chat_turn(session, input).await;
        spinner.finish_and_clear();

        match result {
            Ok(outcome) => {
                println!("\n{} {}\n", style("Julia:").cyan().bold(), outcome.answer);
                if !outcome.context.is_empty() {
                    println!(
                        "{}\n",
                        style(format!("({} extrait(s) de contexte utilisés)", outcome.context.len()))
                            .dim()
                    );
                }
            }
            Err(e) => {
                Output::error(&format!("{}", e));
                if e.is_recoverable() {
                    Output::info("Réessayez dans un instant.");
                }
            }
        }
    }

    Ok(())
}
