//! Teinte - DISC 4Colors pitch coaching
//!
//! A coaching assistant that infers a DISC 4Colors behavioral profile from a
//! voice or video pitch, then holds a profile-styled chat conversation
//! grounded in a profile-scoped knowledge base.
//!
//! The name "Teinte" is French for "tint" — the four color profiles tint
//! every answer.
//!
//! # Overview
//!
//! Teinte allows you to:
//! - Transcribe a pitch recording (audio or video) in French
//! - Detect the speaker's DISC profile from weighted keyword scoring
//! - Chat with "Julia", a coach persona styled to the detected profile
//! - Ground answers in a knowledge base scoped to that profile
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `media` - Upload validation and audio extraction
//! - `transcription` - Speech-to-text transcription
//! - `profile`, `lexicon`, `classifier` - Profile inference
//! - `embedding` - Embedding generation
//! - `retrieval` - Profile-scoped context retrieval
//! - `generation` - Profile-styled response generation
//! - `store` - Records, vector index and media content store
//! - `session` - Per-user interactive state
//! - `pipeline` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use teinte::config::Settings;
//! use teinte::pipeline::{CoachPipeline, PitchUpload};
//! use teinte::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = CoachPipeline::new(settings)?;
//!     let mut session = Session::new();
//!
//!     let upload = PitchUpload::from_file(std::path::Path::new("pitch.mp4"))?;
//!     let outcome = pipeline.process_pitch(&mut session, upload).await?;
//!     println!("Profil détecté : {}", outcome.classification.profile);
//!
//!     let turn = pipeline.chat_turn(&mut session, "Comment améliorer mon pitch ?").await?;
//!     println!("{}", turn.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod lexicon;
pub mod media;
pub mod openai;
pub mod pipeline;
pub mod profile;
pub mod retrieval;
pub mod session;
pub mod store;
pub mod transcription;

pub use error::{Result, TeinteError};
