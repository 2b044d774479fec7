//! Content store for uploaded pitch media.
//!
//! The pipeline persists a pitch two-phase: put the media object first, then
//! write the pitch record, deleting the object again if the record write
//! fails. Both implementations here expose the same three operations so the
//! rollback path is identical.

use crate::error::{Result, TeinteError};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Trait for media content stores.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store bytes under a key and return a retrievable URL.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;

    /// Delete the object stored under a key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Whether the configured bucket/namespace exists. A missing namespace
    /// is a fatal configuration error reported before any processing.
    async fn namespace_exists(&self) -> Result<bool>;
}

/// Local-directory content store (default provider).
pub struct LocalContentStore {
    root: PathBuf,
    bucket: String,
}

impl LocalContentStore {
    /// Create a local store rooted at `root`; the bucket is a subdirectory.
    pub fn new(root: PathBuf, bucket: &str) -> Self {
        Self {
            root,
            bucket: bucket.to_string(),
        }
    }

    /// Create the bucket directory if missing.
    pub fn ensure_bucket(&self) -> Result<()> {
        std::fs::create_dir_all(self.root.join(&self.bucket))?;
        Ok(())
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(&self.bucket).join(key)
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    #[instrument(skip(self, bytes), fields(key = %key, size = bytes.len()))]
    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<String> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        debug!("Stored media object at {:?}", path);
        Ok(format!("file://{}", path.display()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<()> {
        tokio::fs::remove_file(self.object_path(key)).await?;
        info!("Deleted media object {}", key);
        Ok(())
    }

    async fn namespace_exists(&self) -> Result<bool> {
        Ok(self.root.join(&self.bucket).is_dir())
    }
}

/// Supabase Storage content store.
///
/// Talks to the Storage REST API of a Supabase project; the bucket must be
/// public-readable and accept the configured MIME types.
pub struct SupabaseContentStore {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
    api_key: String,
}

impl SupabaseContentStore {
    /// Create a store for `bucket` on the given Supabase project URL.
    ///
    /// Reads the service key from the `SUPABASE_KEY` environment variable.
    pub fn new(base_url: &str, bucket: &str) -> Result<Self> {
        let api_key = std::env::var("SUPABASE_KEY").map_err(|_| {
            TeinteError::Config("SUPABASE_KEY not set. Set it with: export SUPABASE_KEY='...'".to_string())
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            api_key,
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key)
    }

    /// Public download URL for a stored object.
    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, key
        )
    }
}

#[async_trait]
impl ContentStore for SupabaseContentStore {
    #[instrument(skip(self, bytes), fields(key = %key, size = bytes.len()))]
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let response = self
            .client
            .post(self.object_url(key))
            .bearer_auth(&self.api_key)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TeinteError::Persistence(format!(
                "Media upload failed ({}): {}",
                status, body
            )));
        }

        info!("Uploaded media object {}", key);
        Ok(self.public_url(key))
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.object_url(key))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TeinteError::Persistence(format!(
                "Media delete failed ({})",
                response.status()
            )));
        }

        info!("Deleted media object {}", key);
        Ok(())
    }

    async fn namespace_exists(&self) -> Result<bool> {
        let url = format!("{}/storage/v1/bucket/{}", self.base_url, self.bucket);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_store_put_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalContentStore::new(dir.path().to_path_buf(), "pitch-videos");
        store.ensure_bucket().unwrap();
        assert!(store.namespace_exists().await.unwrap());

        let url = store
            .put("20240101_pitch.mp4", b"bytes".to_vec(), "video/mp4")
            .await
            .unwrap();
        assert!(url.starts_with("file://"));
        assert!(dir.path().join("pitch-videos/20240101_pitch.mp4").exists());

        store.delete("20240101_pitch.mp4").await.unwrap();
        assert!(!dir.path().join("pitch-videos/20240101_pitch.mp4").exists());
    }

    #[tokio::test]
    async fn test_missing_namespace_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalContentStore::new(dir.path().to_path_buf(), "absent");
        assert!(!store.namespace_exists().await.unwrap());
    }
}
