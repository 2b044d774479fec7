//! Per-user interactive session state.
//!
//! A Session is an explicit context object threaded through every pipeline
//! call; there is no process-wide session singleton. Sessions never share
//! mutable state with each other — only the static lexicon and settings.

use crate::profile::Profile;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One turn of the in-session conversation history.
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    /// Profile active when the turn was taken.
    pub profile: Profile,
    pub question: String,
    /// Retrieved context snippets, in retrieval order.
    pub context: Vec<String>,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// An upload accepted but not yet processed.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub file_name: String,
    pub size_bytes: u64,
}

/// One user's live interactive state.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    profile: Option<Profile>,
    history: Vec<ConversationTurn>,
    pub pending_upload: Option<PendingUpload>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a fresh session with no profile and empty history.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            profile: None,
            history: Vec::new(),
            pending_upload: None,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current profile, if a pitch has been processed or an override set.
    pub fn profile(&self) -> Option<Profile> {
        self.profile
    }

    /// Set the profile detected from a processed pitch.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    /// User override of the detected profile.
    pub fn override_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    /// Ordered conversation history, oldest first.
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// Append a completed turn. Turns are append-only; a failed turn is
    /// never appended, so history ordering cannot be corrupted.
    pub fn push_turn(&mut self, turn: ConversationTurn) {
        self.history.push(turn);
    }
}
