//! Profile-scoped context retrieval for coaching responses.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::profile::Profile;
use crate::store::ContextIndex;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Retrieves ranked context snippets for a query, scoped to a profile.
pub struct ContextRetriever {
    index: Arc<dyn ContextIndex>,
    embedder: Arc<dyn Embedder>,
    max_snippets: usize,
    min_score: f32,
}

impl ContextRetriever {
    /// Create a new retriever with default limits (3 snippets at 0.75).
    pub fn new(index: Arc<dyn ContextIndex>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            index,
            embedder,
            max_snippets: 3,
            min_score: 0.75,
        }
    }

    /// Set the maximum number of context snippets.
    pub fn with_max_snippets(mut self, max_snippets: usize) -> Self {
        self.max_snippets = max_snippets;
        self
    }

    /// Set the minimum similarity score threshold.
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Retrieve context snippets for a query.
    ///
    /// Returns an empty sequence when nothing clears the threshold; that is
    /// a valid outcome, not an error.
    #[instrument(skip(self), fields(profile = %profile))]
    pub async fn retrieve(&self, query: &str, profile: Profile) -> Result<Vec<String>> {
        let query_embedding = self.embedder.embed(query).await?;

        let matches = self
            .index
            .search(&query_embedding, profile, self.min_score, self.max_snippets)
            .await?;

        debug!("Retrieved {} context snippets", matches.len());

        Ok(matches.into_iter().map(|m| m.content).collect())
    }
}

/// Join context snippets for the generation prompt, order preserved.
pub fn join_context(snippets: &[String]) -> String {
    snippets.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ContextDocument, ContextMatch};
    use async_trait::async_trait;

    struct FixedEmbedder(Vec<f32>);

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| self.0.clone()).collect())
        }

        fn dimensions(&self) -> usize {
            self.0.len()
        }
    }

    struct FixedIndex(Vec<ContextMatch>);

    #[async_trait]
    impl ContextIndex for FixedIndex {
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
            min_score: f32,
            limit: usize,
        ) -> Result<Vec<ContextMatch>> {
            let mut out: Vec<ContextMatch> = self
                .0
                .iter()
                .filter(|m| m.score >= min_score)
                .cloned()
                .collect();
            out.truncate(limit);
            Ok(out)
        }

        async fn document_count(&self) -> Result<usize> {
            Ok(self.0.len())
        }
    }

    #[tokio::test]
    async fn test_retrieve_returns_ordered_contents() {
        let index = FixedIndex(vec![
            ContextMatch {
                content: "premier".to_string(),
                score: 0.9,
            },
            ContextMatch {
                content: "second".to_string(),
                score: 0.8,
            },
        ]);
        let retriever =
            ContextRetriever::new(Arc::new(index), Arc::new(FixedEmbedder(vec![1.0, 0.0])));

        let snippets = retriever.retrieve("question", Profile::Green).await.unwrap();
        assert_eq!(snippets, vec!["premier".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn test_retrieve_below_threshold_is_empty_not_error() {
        let index = FixedIndex(vec![ContextMatch {
            content: "faible".to_string(),
            score: 0.2,
        }]);
        let retriever =
            ContextRetriever::new(Arc::new(index), Arc::new(FixedEmbedder(vec![1.0, 0.0])));

        let snippets = retriever.retrieve("question", Profile::Blue).await.unwrap();
        assert!(snippets.is_empty());
    }

    #[test]
    fn test_join_context_preserves_order() {
        let snippets = vec!["a".to_string(), "b".to_string()];
        assert_eq!(join_context(&snippets), "a\nb");
        assert_eq!(join_context(&[]), "");
    }
}
