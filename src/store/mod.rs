//! Persistence layer for Teinte.
//!
//! Three independent concerns live here: the profile-tagged vector index
//! that retrieval searches, the append-only coaching records (pitches,
//! conversation turns, feedback), and the content store holding uploaded
//! pitch media. All record writes are append-only; pitch records pair with
//! a media object and are persisted two-phase by the pipeline.

mod content;
mod sqlite;

pub use content::{ContentStore, LocalContentStore, SupabaseContentStore};
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::profile::Profile;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A coaching-knowledge document stored in the vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextDocument {
    /// Unique document ID.
    pub id: Uuid,
    /// Profile this document is scoped to.
    pub profile: Profile,
    /// Short source title.
    pub title: String,
    /// Text content of this snippet.
    pub content: String,
    /// Embedding vector.
    pub embedding: Vec<f32>,
    /// When this document was indexed.
    pub indexed_at: DateTime<Utc>,
}

impl ContextDocument {
    /// Create a new context document.
    pub fn new(profile: Profile, title: String, content: String, embedding: Vec<f32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile,
            title,
            content,
            embedding,
            indexed_at: Utc::now(),
        }
    }
}

/// A retrieval match: snippet content with its similarity score.
#[derive(Debug, Clone)]
pub struct ContextMatch {
    pub content: String,
    pub score: f32,
}

/// Trait for the profile-scoped vector index.
#[async_trait]
pub trait ContextIndex: Send + Sync {
    /// Store a document with its embedding.
    async fn upsert(&self, doc: &ContextDocument) -> Result<()>;

    /// Bulk upsert documents.
    async fn upsert_batch(&self, docs: &[ContextDocument]) -> Result<usize>;

    /// Search documents tagged with `profile`, keeping matches at or above
    /// `min_score`, ranked descending, truncated to `limit`.
    async fn search(
        &self,
        query_embedding: &[f32],
        profile: Profile,
        min_score: f32,
        limit: usize,
    ) -> Result<Vec<ContextMatch>>;

    /// Total indexed document count.
    async fn document_count(&self) -> Result<usize>;
}

/// A processed pitch: transcript, detected profile and media reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchRecord {
    pub id: Uuid,
    pub transcription: String,
    pub profile: Profile,
    /// Raw score of the winning profile at classification time.
    pub raw_score: u32,
    pub file_name: String,
    pub file_size: u64,
    /// Retrievable URL of the uploaded media object.
    pub video_url: String,
    pub created_at: DateTime<Utc>,
}

impl PitchRecord {
    pub fn new(
        transcription: String,
        profile: Profile,
        raw_score: u32,
        file_name: String,
        file_size: u64,
        video_url: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            transcription,
            profile,
            raw_score,
            file_name,
            file_size,
            video_url,
            created_at: Utc::now(),
        }
    }
}

/// One persisted conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    pub id: Uuid,
    /// Profile active when the turn was taken.
    pub profile: Profile,
    pub question: String,
    pub response: String,
    /// Retrieved context snippets, in retrieval order.
    pub context: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TurnRecord {
    pub fn new(profile: Profile, question: String, response: String, context: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile,
            question,
            response,
            context,
            created_at: Utc::now(),
        }
    }
}

/// Free-form user feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub content: String,
    pub profile: Option<Profile>,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    pub fn new(content: String, profile: Option<Profile>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            profile,
            created_at: Utc::now(),
        }
    }
}

/// Trait for the append-only coaching record store.
///
/// Each insert is an independent write; failures are surfaced to the caller,
/// never swallowed.
#[async_trait]
pub trait CoachStore: Send + Sync {
    async fn insert_pitch(&self, pitch: &PitchRecord) -> Result<()>;

    async fn insert_turn(&self, turn: &TurnRecord) -> Result<()>;

    async fn insert_feedback(&self, feedback: &FeedbackRecord) -> Result<()>;

    /// List persisted turns, oldest first.
    async fn list_turns(&self) -> Result<Vec<TurnRecord>>;

    /// List persisted pitches, newest first.
    async fn list_pitches(&self) -> Result<Vec<PitchRecord>>;
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_mismatched_lengths() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }
}
