//! OpenAI-backed embedding generation.

use super::Embedder;
use crate::error::{Result, TeinteError};
use crate::openai::create_client;
use async_openai::types::{CreateEmbeddingRequestArgs, EmbeddingInput};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Embeddings only serve retrieval in this crate, so every failure here is
/// reported under the retrieval error class.
pub struct OpenAIEmbedder {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    dimensions: usize,
}

/// Largest batch sent in one API request when seeding the knowledge base.
const MAX_BATCH: usize = 100;

impl OpenAIEmbedder {
    pub fn new() -> Self {
        Self::with_config("text-embedding-3-small", 1536)
    }

    pub fn with_config(model: &str, dimensions: usize) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            dimensions,
        }
    }

    async fn request(&self, input: EmbeddingInput) -> Result<Vec<Vec<f32>>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(input)
            .dimensions(self.dimensions as u32)
            .build()
            .map_err(|e| TeinteError::Retrieval(format!("Bad embedding request: {e}")))?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| TeinteError::Retrieval(format!("Embedding API error: {e}")))?;

        // The API does not guarantee response order matches the input.
        let mut data = response.data;
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

impl Default for OpenAIEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self
            .request(EmbeddingInput::String(text.to_string()))
            .await?;
        match vectors.pop() {
            Some(v) if vectors.is_empty() => Ok(v),
            _ => Err(TeinteError::Retrieval(
                "Expected exactly one embedding in response".to_string(),
            )),
        }
    }

    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(MAX_BATCH) {
            debug!("Embedding batch of {} passages", chunk.len());
            let vectors = self
                .request(EmbeddingInput::StringArray(chunk.to_vec()))
                .await?;
            out.extend(vectors);
        }
        Ok(out)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedder_configuration() {
        assert_eq!(OpenAIEmbedder::new().dimensions(), 1536);
        assert_eq!(
            OpenAIEmbedder::with_config("text-embedding-3-large", 3072).dimensions(),
            3072
        );
    }
}
