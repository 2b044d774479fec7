//! Coaching pipeline orchestration.
//!
//! Wires the adapters together for the two request cycles: processing a
//! pitch upload (validate, transcribe, classify, persist two-phase) and
//! running a chat turn (retrieve, generate, persist). Each call drives one
//! Session passed in explicitly; the pipeline itself holds only immutable
//! components and can serve independent sessions.

use crate::classifier::{classify, Classification};
use crate::config::{Settings, StorageProvider};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{Result, TeinteError};
use crate::generation::{CoachResponder, Responder};
use crate::lexicon::Lexicon;
use crate::media::{content_type, validate_upload};
use crate::retrieval::ContextRetriever;
use crate::session::{ConversationTurn, PendingUpload, Session};
use crate::store::{
    CoachStore, ContentStore, ContextDocument, ContextIndex, FeedbackRecord, LocalContentStore,
    PitchRecord, SqliteStore, SupabaseContentStore, TurnRecord,
};
use crate::transcription::{Transcriber, WhisperTranscriber};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// An upload handed over by the presentation shell: declared name plus bytes.
#[derive(Debug, Clone)]
pub struct PitchUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PitchUpload {
    /// Read an upload from a local file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| TeinteError::Validation(format!("Invalid file name: {:?}", path)))?
            .to_string();
        let bytes = std::fs::read(path)?;
        Ok(Self { file_name, bytes })
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Result of processing one pitch upload.
#[derive(Debug, Clone)]
pub struct PitchOutcome {
    pub transcription: String,
    pub classification: Classification,
    pub video_url: String,
}

/// Result of one chat turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub answer: String,
    pub context: Vec<String>,
}

/// The main coaching pipeline.
pub struct CoachPipeline {
    settings: Settings,
    lexicon: Lexicon,
    transcriber: Arc<dyn Transcriber>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn ContextIndex>,
    responder: Arc<dyn Responder>,
    records: Arc<dyn CoachStore>,
    media_store: Arc<dyn ContentStore>,
}

impl CoachPipeline {
    /// Create a pipeline with real components from configuration.
    pub fn new(settings: Settings) -> Result<Self> {
        let store = Arc::new(SqliteStore::new(&settings.sqlite_path())?);

        let media_store: Arc<dyn ContentStore> = match settings.storage.provider {
            StorageProvider::Local => Arc::new(LocalContentStore::new(
                settings.media_dir(),
                &settings.storage.bucket,
            )),
            StorageProvider::Supabase => {
                let base_url = settings.storage.supabase_url.as_deref().ok_or_else(|| {
                    TeinteError::Config(
                        "storage.supabase_url is required for the supabase provider".to_string(),
                    )
                })?;
                Arc::new(SupabaseContentStore::new(base_url, &settings.storage.bucket)?)
            }
        };

        let transcriber = Arc::new(WhisperTranscriber::with_config(
            &settings.transcription.model,
            &settings.transcription.language,
        ));

        let embedder = Arc::new(OpenAIEmbedder::with_config(
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
        ));

        let responder = Arc::new(CoachResponder::with_config(
            &settings.generation.model,
            settings.generation.base_temperature,
            settings.generation.creative_temperature,
        ));

        let lexicon = settings.lexicon.clone();

        Ok(Self {
            settings,
            lexicon,
            transcriber,
            embedder,
            index: store.clone(),
            responder,
            records: store,
            media_store,
        })
    }

    /// Create a pipeline with custom components (used in tests and by
    /// embedders of the library).
    #[allow(clippy::too_many_arguments)]
    pub fn with_components(
        settings: Settings,
        transcriber: Arc<dyn Transcriber>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn ContextIndex>,
        responder: Arc<dyn Responder>,
        records: Arc<dyn CoachStore>,
        media_store: Arc<dyn ContentStore>,
    ) -> Self {
        let lexicon = settings.lexicon.clone();
        Self {
            settings,
            lexicon,
            transcriber,
            embedder,
            index,
            responder,
            records,
            media_store,
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the record store.
    pub fn records(&self) -> Arc<dyn CoachStore> {
        self.records.clone()
    }

    /// Get the media content store.
    pub fn media_store(&self) -> Arc<dyn ContentStore> {
        self.media_store.clone()
    }

    fn retriever(&self) -> ContextRetriever {
        ContextRetriever::new(self.index.clone(), self.embedder.clone())
            .with_max_snippets(self.settings.retrieval.max_snippets)
            .with_min_score(self.settings.retrieval.min_score)
    }

    /// Process a pitch upload end to end.
    ///
    /// Validates the upload, transcribes it (extracting audio from video
    /// first), classifies the transcript and persists pitch + media object
    /// two-phase. On success the session takes the detected profile; on any
    /// failure the session is left untouched.
    #[instrument(skip(self, session, upload), fields(file = %upload.file_name))]
    pub async fn process_pitch(
        &self,
        session: &mut Session,
        upload: PitchUpload,
    ) -> Result<PitchOutcome> {
        // Fatal configuration problems are reported before any work.
        if !self.media_store.namespace_exists().await? {
            return Err(TeinteError::Config(format!(
                "Storage namespace '{}' does not exist. Run 'teinte init' first.",
                self.settings.storage.bucket
            )));
        }

        let kind = validate_upload(&self.settings.upload, &upload.file_name, upload.size_bytes())?;

        // Accepted but not yet processed; stays set if a later stage fails
        // so the caller can offer a retry of the same upload.
        session.pending_upload = Some(PendingUpload {
            file_name: upload.file_name.clone(),
            size_bytes: upload.size_bytes(),
        });

        // The upload lives in a scoped temp dir for the duration of the
        // request; dropped on every exit path.
        let temp_dir = tempfile::tempdir()?;
        let media_path = temp_dir.path().join(&upload.file_name);
        tokio::fs::write(&media_path, &upload.bytes).await?;

        let transcription = self.transcriber.transcribe(&media_path, kind).await?;
        let classification = classify(&self.lexicon, &transcription);

        info!(
            profile = %classification.profile,
            score = classification.raw_score(),
            "Pitch classified"
        );

        let key = storage_key(&upload.file_name);
        let mime = content_type(&upload.file_name);
        let video_url = self
            .persist_pitch_with_media(&key, upload.bytes.clone(), mime, |url| {
                PitchRecord::new(
                    transcription.clone(),
                    classification.profile,
                    classification.raw_score(),
                    upload.file_name.clone(),
                    upload.size_bytes(),
                    url,
                )
            })
            .await?;

        session.set_profile(classification.profile);
        session.pending_upload = None;

        Ok(PitchOutcome {
            transcription,
            classification,
            video_url,
        })
    }

    /// Compensating two-phase write: upload the media object, then insert
    /// the pitch record; if the insert fails, delete the object again so no
    /// orphan survives a reported failure.
    async fn persist_pitch_with_media(
        &self,
        key: &str,
        bytes: Vec<u8>,
        mime: &str,
        build_record: impl FnOnce(String) -> PitchRecord,
    ) -> Result<String> {
        let url = self.media_store.put(key, bytes, mime).await?;

        let record = build_record(url.clone());
        if let Err(insert_err) = self.records.insert_pitch(&record).await {
            warn!("Pitch record insert failed, rolling back media object {}", key);
            if let Err(delete_err) = self.media_store.delete(key).await {
                warn!("Rollback of media object {} failed: {}", key, delete_err);
            }
            return Err(TeinteError::Persistence(format!(
                "Pitch record write failed (media object rolled back): {}",
                insert_err
            )));
        }

        Ok(url)
    }

    /// Run one chat turn: retrieve context, generate an answer, persist the
    /// turn and append it to the session history.
    ///
    /// A failed generation drops the turn entirely — nothing is appended or
    /// persisted. A turn that generated but failed to persist stays in the
    /// session history and the persistence error is returned to the caller.
    #[instrument(skip(self, session, question))]
    pub async fn chat_turn(&self, session: &mut Session, question: &str) -> Result<TurnOutcome> {
        let profile = session.profile().ok_or_else(|| {
            TeinteError::Validation(
                "No profile set for this session. Process a pitch or choose a profile first."
                    .to_string(),
            )
        })?;

        let context = match self.retriever().retrieve(question, profile).await {
            Ok(snippets) => snippets,
            Err(e) if self.settings.retrieval.continue_without_context => {
                warn!("Retrieval failed, continuing with empty context: {}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let answer = self
            .responder
            .generate(question, &context, profile)
            .await?;

        let record = TurnRecord::new(
            profile,
            question.to_string(),
            answer.clone(),
            context.clone(),
        );

        session.push_turn(ConversationTurn {
            profile,
            question: question.to_string(),
            context: context.clone(),
            answer: answer.clone(),
            created_at: record.created_at,
        });

        self.records.insert_turn(&record).await?;

        Ok(TurnOutcome { answer, context })
    }

    /// Record free-form user feedback.
    #[instrument(skip(self, session, content))]
    pub async fn record_feedback(&self, session: &Session, content: &str) -> Result<()> {
        let feedback = FeedbackRecord::new(content.to_string(), session.profile());
        self.records.insert_feedback(&feedback).await
    }

    /// Seed the profile-scoped knowledge base from raw text.
    ///
    /// Splits on blank lines, embeds each passage and indexes it under the
    /// given profile. Returns the number of indexed documents.
    #[instrument(skip(self, text), fields(profile = %profile))]
    pub async fn seed_context(
        &self,
        profile: crate::profile::Profile,
        title: &str,
        text: &str,
    ) -> Result<usize> {
        let passages: Vec<String> = text
            .split("\n\n")
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
            .collect();

        if passages.is_empty() {
            return Ok(0);
        }

        let embeddings = self.embedder.embed_batch(&passages).await?;

        let docs: Vec<ContextDocument> = passages
            .into_iter()
            .zip(embeddings)
            .map(|(content, embedding)| {
                ContextDocument::new(profile, title.to_string(), content, embedding)
            })
            .collect();

        self.index.upsert_batch(&docs).await
    }
}

/// Globally-unique storage key: UTC time prefix plus sanitized file name.
fn storage_key(file_name: &str) -> String {
    let sanitized: String = file_name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    format!("{}_{}", Utc::now().format("%Y%m%d%H%M%S"), sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaKind;
    use crate::profile::Profile;
    use crate::store::ContextMatch;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeTranscriber(String);

    #[async_trait]
    impl Transcriber for FakeTranscriber {
        async fn transcribe(&self, _media_path: &Path, _kind: MediaKind) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FakeEmbedder;

    #[async_trait]
    impl Embedder for FakeEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }

        fn dimensions(&self) -> usize {
            2
        }
    }

    struct EmptyIndex;

    #[async_trait]
    impl ContextIndex for EmptyIndex {
        async fn upsert(&self, _doc: &ContextDocument) -> Result<()> {
            Ok(())
        }

        async fn upsert_batch(&self, docs: &[ContextDocument]) -> Result<usize> {
            Ok(docs.len())
        }

        async fn search(
            &self,
            _query_embedding: &[f32],
            _profile: Profile,
            _min_score: f32,
            _limit: usize,
        ) -> Result<Vec<ContextMatch>> {
            Ok(Vec::new())
        }

        async fn document_count(&self) -> Result<usize> {
            Ok(0)
        }
    }

    struct FailingIndex;

    #[async_trait]
    impl ContextIndex for FailingIndex {
        async fn upsert(&self, _doc: &ContextDocument) -> Result<()> {
            Err(TeinteError::Retrieval("index down".to_string()))
        }

        async fn upsert_batch(&self, _docs: &[ContextDocument]) -> Result<usize> {
            Err(TeinteError::Retrieval("index down".to_string()))
        }

        async fn search(
            &self,
            _query_embedding: &[f32],
            _profile: Profile,
            _min_score: f32,
            _limit: usize,
        ) -> Result<Vec<ContextMatch>> {
            Err(TeinteError::Retrieval("index down".to_string()))
        }

        async fn document_count(&self) -> Result<usize> {
            Ok(0)
        }
    }

    struct FakeResponder;

    #[async_trait]
    impl Responder for FakeResponder {
        async fn generate(
            &self,
            _question: &str,
            _context: &[String],
            _profile: Profile,
        ) -> Result<String> {
            Ok("Voici mon conseil.".to_string())
        }
    }

    struct FailingResponder;

    #[async_trait]
    impl Responder for FailingResponder {
        async fn generate(
            &self,
            _question: &str,
            _context: &[String],
            _profile: Profile,
        ) -> Result<String> {
            Err(TeinteError::Generation("model unavailable".to_string()))
        }
    }

    /// Record store whose pitch inserts always fail; counts delete calls
    /// are observed through the content store instead.
    struct FailingPitchStore;

    #[async_trait]
    impl CoachStore for FailingPitchStore {
        async fn insert_pitch(&self, _pitch: &PitchRecord) -> Result<()> {
            Err(TeinteError::Persistence("disk full".to_string()))
        }

        async fn insert_turn(&self, _turn: &TurnRecord) -> Result<()> {
            Ok(())
        }

        async fn insert_feedback(&self, _feedback: &FeedbackRecord) -> Result<()> {
            Ok(())
        }

        async fn list_turns(&self) -> Result<Vec<TurnRecord>> {
            Ok(Vec::new())
        }

        async fn list_pitches(&self) -> Result<Vec<PitchRecord>> {
            Ok(Vec::new())
        }
    }

    /// Record store whose turn inserts always fail.
    struct FailingTurnStore;

    #[async_trait]
    impl CoachStore for FailingTurnStore {
        async fn insert_pitch(&self, _pitch: &PitchRecord) -> Result<()> {
            Ok(())
        }

        async fn insert_turn(&self, _turn: &TurnRecord) -> Result<()> {
            Err(TeinteError::Persistence("disk full".to_string()))
        }

        async fn insert_feedback(&self, _feedback: &FeedbackRecord) -> Result<()> {
            Ok(())
        }

        async fn list_turns(&self) -> Result<Vec<TurnRecord>> {
            Ok(Vec::new())
        }

        async fn list_pitches(&self) -> Result<Vec<PitchRecord>> {
            Ok(Vec::new())
        }
    }

    /// In-memory content store tracking stored keys.
    struct CountingContentStore {
        keys: std::sync::Mutex<Vec<String>>,
        deletes: AtomicUsize,
    }

    impl CountingContentStore {
        fn new() -> Self {
            Self {
                keys: std::sync::Mutex::new(Vec::new()),
                deletes: AtomicUsize::new(0),
            }
        }

        fn stored_keys(&self) -> Vec<String> {
            self.keys.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContentStore for CountingContentStore {
        async fn put(&self, key: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<String> {
            self.keys.lock().unwrap().push(key.to_string());
            Ok(format!("mem://{}", key))
        }

        async fn delete(&self, key: &str) -> Result<()> {
            self.keys.lock().unwrap().retain(|k| k != key);
            self.deletes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn namespace_exists(&self) -> Result<bool> {
            Ok(true)
        }
    }

    fn pipeline_with(
        index: Arc<dyn ContextIndex>,
        responder: Arc<dyn Responder>,
        records: Arc<dyn CoachStore>,
        media_store: Arc<dyn ContentStore>,
    ) -> CoachPipeline {
        CoachPipeline::with_components(
            Settings::default(),
            Arc::new(FakeTranscriber("notre équipe collabore avec harmonie".to_string())),
            Arc::new(FakeEmbedder),
            index,
            responder,
            records,
            media_store,
        )
    }

    fn upload() -> PitchUpload {
        PitchUpload {
            file_name: "pitch.mp3".to_string(),
            bytes: b"fake audio".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_process_pitch_sets_session_profile() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let media = Arc::new(CountingContentStore::new());
        let pipeline = pipeline_with(
            store.clone(),
            Arc::new(FakeResponder),
            store.clone(),
            media.clone(),
        );

        let mut session = Session::new();
        let outcome = pipeline.process_pitch(&mut session, upload()).await.unwrap();

        assert_eq!(outcome.classification.profile, Profile::Green);
        assert_eq!(outcome.classification.raw_score(), 5);
        assert_eq!(session.profile(), Some(Profile::Green));
        assert!(session.pending_upload.is_none());
        assert_eq!(media.stored_keys().len(), 1);

        let pitches = store.list_pitches().await.unwrap();
        assert_eq!(pitches.len(), 1);
        assert_eq!(pitches[0].video_url, outcome.video_url);
    }

    #[tokio::test]
    async fn test_failed_pitch_write_rolls_back_media_object() {
        let media = Arc::new(CountingContentStore::new());
        let pipeline = pipeline_with(
            Arc::new(EmptyIndex),
            Arc::new(FakeResponder),
            Arc::new(FailingPitchStore),
            media.clone(),
        );

        let mut session = Session::new();
        let err = pipeline
            .process_pitch(&mut session, upload())
            .await
            .unwrap_err();

        assert!(matches!(err, TeinteError::Persistence(_)));
        // The just-uploaded object was deleted: no orphan retained.
        assert!(media.stored_keys().is_empty());
        assert_eq!(media.deletes.load(Ordering::SeqCst), 1);
        // The session profile is unchanged by the failed upload; the upload
        // itself stays pending for a retry.
        assert!(session.profile().is_none());
        assert!(session.pending_upload.is_some());
    }

    #[tokio::test]
    async fn test_validation_rejects_before_any_side_effect() {
        let media = Arc::new(CountingContentStore::new());
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let pipeline = pipeline_with(
            store.clone(),
            Arc::new(FakeResponder),
            store,
            media.clone(),
        );

        let mut session = Session::new();
        let oversized = PitchUpload {
            file_name: "pitch.mp3".to_string(),
            bytes: vec![0u8; 51 * 1024 * 1024],
        };
        let err = pipeline
            .process_pitch(&mut session, oversized)
            .await
            .unwrap_err();

        assert!(matches!(err, TeinteError::Validation(_)));
        assert!(media.stored_keys().is_empty());
    }

    #[tokio::test]
    async fn test_chat_turn_with_empty_retrieval_still_answers() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let pipeline = pipeline_with(
            Arc::new(EmptyIndex),
            Arc::new(FakeResponder),
            store.clone(),
            Arc::new(CountingContentStore::new()),
        );

        let mut session = Session::new();
        session.set_profile(Profile::Blue);

        let outcome = pipeline
            .chat_turn(&mut session, "Comment structurer mon pitch ?")
            .await
            .unwrap();

        assert!(outcome.context.is_empty());
        assert!(!outcome.answer.is_empty());
        assert_eq!(session.history().len(), 1);

        let turns = store.list_turns().await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].profile, Profile::Blue);
        assert!(turns[0].context.is_empty());
    }

    #[tokio::test]
    async fn test_chat_turn_requires_a_profile() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let pipeline = pipeline_with(
            Arc::new(EmptyIndex),
            Arc::new(FakeResponder),
            store,
            Arc::new(CountingContentStore::new()),
        );

        let mut session = Session::new();
        let err = pipeline.chat_turn(&mut session, "Bonjour").await.unwrap_err();
        assert!(matches!(err, TeinteError::Validation(_)));
    }

    #[tokio::test]
    async fn test_failed_generation_drops_the_turn() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let pipeline = pipeline_with(
            Arc::new(EmptyIndex),
            Arc::new(FailingResponder),
            store.clone(),
            Arc::new(CountingContentStore::new()),
        );

        let mut session = Session::new();
        session.set_profile(Profile::Red);

        let err = pipeline
            .chat_turn(&mut session, "Une question")
            .await
            .unwrap_err();

        assert!(matches!(err, TeinteError::Generation(_)));
        // Dropped entirely: neither in history nor persisted.
        assert!(session.history().is_empty());
        assert!(store.list_turns().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_turn_failing_to_persist_stays_in_history() {
        let pipeline = pipeline_with(
            Arc::new(EmptyIndex),
            Arc::new(FakeResponder),
            Arc::new(FailingTurnStore),
            Arc::new(CountingContentStore::new()),
        );

        let mut session = Session::new();
        session.set_profile(Profile::Green);

        let err = pipeline
            .chat_turn(&mut session, "Comment conclure ?")
            .await
            .unwrap_err();

        // The user saw the answer, so the turn stays in history; only the
        // persistence failure is surfaced.
        assert!(matches!(err, TeinteError::Persistence(_)));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].question, "Comment conclure ?");
        assert!(!session.history()[0].answer.is_empty());
    }

    #[tokio::test]
    async fn test_retrieval_failure_continues_with_empty_context_by_policy() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let pipeline = pipeline_with(
            Arc::new(FailingIndex),
            Arc::new(FakeResponder),
            store,
            Arc::new(CountingContentStore::new()),
        );

        let mut session = Session::new();
        session.set_profile(Profile::Yellow);

        // Default policy: continue_without_context = true.
        let outcome = pipeline.chat_turn(&mut session, "Une idée ?").await.unwrap();
        assert!(outcome.context.is_empty());
        assert!(!outcome.answer.is_empty());
    }

    #[tokio::test]
    async fn test_retrieval_failure_propagates_when_policy_disabled() {
        let mut settings = Settings::default();
        settings.retrieval.continue_without_context = false;

        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let pipeline = CoachPipeline::with_components(
            settings,
            Arc::new(FakeTranscriber(String::new())),
            Arc::new(FakeEmbedder),
            Arc::new(FailingIndex),
            Arc::new(FakeResponder),
            store,
            Arc::new(CountingContentStore::new()),
        );

        let mut session = Session::new();
        session.set_profile(Profile::Yellow);

        let err = pipeline.chat_turn(&mut session, "Une idée ?").await.unwrap_err();
        assert!(matches!(err, TeinteError::Retrieval(_)));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_seed_context_splits_on_blank_lines() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let pipeline = pipeline_with(
            store.clone(),
            Arc::new(FakeResponder),
            store.clone(),
            Arc::new(CountingContentStore::new()),
        );

        let count = pipeline
            .seed_context(Profile::Green, "Guide", "premier passage\n\nsecond passage\n\n")
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.document_count().await.unwrap(), 2);
    }

    #[test]
    fn test_storage_key_sanitizes_and_prefixes() {
        let key = storage_key("mon pitch (v2).mp4");
        assert!(key.ends_with("_mon_pitch__v2_.mp4"));
        // 14-digit UTC timestamp prefix.
        assert_eq!(key.split('_').next().unwrap().len(), 14);
    }
}
