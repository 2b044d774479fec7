//! SQLite-backed store implementation.
//!
//! One database holds both the profile-tagged vector index (cosine
//! similarity computed in Rust) and the append-only coaching records. For
//! large knowledge bases consider the sqlite-vec extension or a dedicated
//! vector database.

use super::{
    cosine_similarity, CoachStore, ContextDocument, ContextIndex, ContextMatch, FeedbackRecord,
    PitchRecord, TurnRecord,
};
use crate::error::{Result, TeinteError};
use crate::profile::Profile;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::{debug, info, instrument};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS context_documents (
    id TEXT PRIMARY KEY,
    profile TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    embedding BLOB NOT NULL,
    indexed_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_context_documents_profile ON context_documents(profile);

CREATE TABLE IF NOT EXISTS pitches (
    id TEXT PRIMARY KEY,
    transcription TEXT NOT NULL,
    profile TEXT NOT NULL,
    raw_score INTEGER NOT NULL,
    file_name TEXT NOT NULL,
    file_size INTEGER NOT NULL,
    video_url TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS conversations (
    id TEXT PRIMARY KEY,
    profile TEXT NOT NULL,
    question TEXT NOT NULL,
    response TEXT NOT NULL,
    context_json TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS feedback (
    id TEXT PRIMARY KEY,
    content TEXT NOT NULL,
    profile TEXT,
    created_at TEXT NOT NULL
);
"#;

/// SQLite-based coaching store and vector index.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SQLite store at the given path.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrent performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized SQLite store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| TeinteError::Persistence(format!("Failed to acquire lock: {}", e)))
    }

    /// Serialize embedding to bytes.
    fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// Deserialize embedding from bytes.
    fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| {
                let arr: [u8; 4] = chunk.try_into().unwrap_or_default();
                f32::from_le_bytes(arr)
            })
            .collect()
    }

    fn parse_timestamp(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now())
    }

    fn parse_profile(s: &str) -> Profile {
        Profile::from_str(s).unwrap_or(Profile::Red)
    }
}

#[async_trait]
impl ContextIndex for SqliteStore {
    #[instrument(skip(self, doc))]
    async fn upsert(&self, doc: &ContextDocument) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO context_documents
            (id, profile, title, content, embedding, indexed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                doc.id.to_string(),
                doc.profile.as_str(),
                doc.title,
                doc.content,
                Self::embedding_to_bytes(&doc.embedding),
                doc.indexed_at.to_rfc3339(),
            ],
        )?;

        debug!("Upserted context document {}", doc.id);
        Ok(())
    }

    #[instrument(skip(self, docs))]
    async fn upsert_batch(&self, docs: &[ContextDocument]) -> Result<usize> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;

        for doc in docs {
            tx.execute(
                r#"
                INSERT OR REPLACE INTO context_documents
                (id, profile, title, content, embedding, indexed_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    doc.id.to_string(),
                    doc.profile.as_str(),
                    doc.title,
                    doc.content,
                    Self::embedding_to_bytes(&doc.embedding),
                    doc.indexed_at.to_rfc3339(),
                ],
            )?;
        }

        tx.commit()?;
        info!("Batch upserted {} context documents", docs.len());
        Ok(docs.len())
    }

    #[instrument(skip(self, query_embedding))]
    async fn search(
        &self,
        query_embedding: &[f32],
        profile: Profile,
        min_score: f32,
        limit: usize,
    ) -> Result<Vec<ContextMatch>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT content, embedding FROM context_documents WHERE profile = ?1",
        )?;

        let rows = stmt.query_map(params![profile.as_str()], |row| {
            let content: String = row.get(0)?;
            let embedding_bytes: Vec<u8> = row.get(1)?;
            Ok((content, Self::bytes_to_embedding(&embedding_bytes)))
        })?;

        let mut results: Vec<ContextMatch> = rows
            .filter_map(|r| r.ok())
            .map(|(content, embedding)| ContextMatch {
                score: cosine_similarity(query_embedding, &embedding),
                content,
            })
            .filter(|m| m.score >= min_score)
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);

        debug!("Found {} context matches for {}", results.len(), profile);
        Ok(results)
    }

    async fn document_count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM context_documents", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[async_trait]
impl CoachStore for SqliteStore {
    #[instrument(skip(self, pitch))]
    async fn insert_pitch(&self, pitch: &PitchRecord) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT INTO pitches
            (id, transcription, profile, raw_score, file_name, file_size, video_url, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                pitch.id.to_string(),
                pitch.transcription,
                pitch.profile.as_str(),
                pitch.raw_score,
                pitch.file_name,
                pitch.file_size as i64,
                pitch.video_url,
                pitch.created_at.to_rfc3339(),
            ],
        )?;

        info!("Stored pitch {} ({})", pitch.id, pitch.profile);
        Ok(())
    }

    #[instrument(skip(self, turn))]
    async fn insert_turn(&self, turn: &TurnRecord) -> Result<()> {
        let conn = self.lock()?;

        let context_json = serde_json::to_string(&turn.context)?;

        conn.execute(
            r#"
            INSERT INTO conversations
            (id, profile, question, response, context_json, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                turn.id.to_string(),
                turn.profile.as_str(),
                turn.question,
                turn.response,
                context_json,
                turn.created_at.to_rfc3339(),
            ],
        )?;

        debug!("Stored conversation turn {}", turn.id);
        Ok(())
    }

    #[instrument(skip(self, feedback))]
    async fn insert_feedback(&self, feedback: &FeedbackRecord) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO feedback (id, content, profile, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                feedback.id.to_string(),
                feedback.content,
                feedback.profile.map(|p| p.as_str()),
                feedback.created_at.to_rfc3339(),
            ],
        )?;

        debug!("Stored feedback {}", feedback.id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_turns(&self) -> Result<Vec<TurnRecord>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, profile, question, response, context_json, created_at
            FROM conversations
            ORDER BY created_at ASC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let id_str: String = row.get(0)?;
            let profile_str: String = row.get(1)?;
            let context_json: String = row.get(4)?;
            let created_at_str: String = row.get(5)?;

            Ok(TurnRecord {
                id: uuid::Uuid::parse_str(&id_str).unwrap_or_default(),
                profile: Self::parse_profile(&profile_str),
                question: row.get(2)?,
                response: row.get(3)?,
                context: serde_json::from_str(&context_json).unwrap_or_default(),
                created_at: Self::parse_timestamp(&created_at_str),
            })
        })?;

        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    #[instrument(skip(self))]
    async fn list_pitches(&self) -> Result<Vec<PitchRecord>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, transcription, profile, raw_score, file_name, file_size, video_url, created_at
            FROM pitches
            ORDER BY created_at DESC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let id_str: String = row.get(0)?;
            let profile_str: String = row.get(2)?;
            let file_size: i64 = row.get(5)?;
            let created_at_str: String = row.get(7)?;

            Ok(PitchRecord {
                id: uuid::Uuid::parse_str(&id_str).unwrap_or_default(),
                transcription: row.get(1)?,
                profile: Self::parse_profile(&profile_str),
                raw_score: row.get(3)?,
                file_name: row.get(4)?,
                file_size: file_size as u64,
                video_url: row.get(6)?,
                created_at: Self::parse_timestamp(&created_at_str),
            })
        })?;

        Ok(rows.filter_map(|r| r.ok()).collect())
    }
}
