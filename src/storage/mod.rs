//! Blob storage for corpora, result records and source media.
//!
//! Thin wrapper over pluggable `object_store` backends. The local and memory
//! backends cover development and tests; S3 is the hosted deployment target
//! and the only backend that issues real presigned URLs.

use crate::config::{StorageBackend, StorageSettings};
use crate::error::{LeseError, Result};
use bytes::Bytes;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::signer::Signer;
use object_store::{path::Path as ObjPath, ObjectStore, PutPayload};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Handle to the configured blob store.
#[derive(Clone)]
pub struct BlobStore {
    store: Arc<dyn ObjectStore>,
    backend: StorageBackend,
    local_base: Option<PathBuf>,
    s3: Option<Arc<AmazonS3>>,
}

impl BlobStore {
    /// Create a blob store from the storage settings.
    ///
    /// The local backend creates its base directory on first use; the s3
    /// backend reads credentials and region from the standard AWS
    /// environment variables.
    pub async fn from_settings(settings: &StorageSettings) -> Result<Self> {
        match settings.backend {
            StorageBackend::Local => {
                let base = resolve_base_dir(&settings.data_dir);
                if !base.exists() {
                    tokio::fs::create_dir_all(&base).await?;
                }
                let store = LocalFileSystem::new_with_prefix(&base)?;
                Ok(Self {
                    store: Arc::new(store),
                    backend: StorageBackend::Local,
                    local_base: Some(base),
                    s3: None,
                })
            }
            StorageBackend::Memory => Ok(Self::memory()),
            StorageBackend::S3 => {
                let bucket = settings.bucket.as_ref().ok_or_else(|| {
                    LeseError::Config("storage.bucket must be set for the s3 backend".to_string())
                })?;
                let s3 = Arc::new(
                    AmazonS3Builder::from_env()
                        .with_bucket_name(bucket.clone())
                        .build()?,
                );
                Ok(Self {
                    store: s3.clone(),
                    backend: StorageBackend::S3,
                    local_base: None,
                    s3: Some(s3),
                })
            }
        }
    }

    /// Create an in-memory blob store.
    pub fn memory() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            backend: StorageBackend::Memory,
            local_base: None,
            s3: None,
        }
    }

    /// Get the configured backend.
    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }

    /// Read a blob and deserialize it as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, location: &str) -> Result<T> {
        let path = ObjPath::from(location);
        let result = self.store.get(&path).await?;
        let bytes = result.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Serialize a value as pretty JSON and write it to a blob.
    pub async fn put_json<T: Serialize>(&self, location: &str, value: &T) -> Result<()> {
        let path = ObjPath::from(location);
        let data = serde_json::to_vec_pretty(value)?;
        self.store
            .put(&path, PutPayload::from_bytes(Bytes::from(data)))
            .await?;
        Ok(())
    }

    /// Check if a blob exists at the given location.
    pub async fn exists(&self, location: &str) -> Result<bool> {
        let path = ObjPath::from(location);
        match self.store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Issue a time-limited read URL for a blob.
    ///
    /// S3 signs a V4 presigned URL. The local backend returns a `file://`
    /// URL for development use; the memory backend cannot produce URLs.
    pub async fn signed_url(&self, location: &str, expires_in: Duration) -> Result<Url> {
        match &self.backend {
            StorageBackend::S3 => {
                let s3 = self.s3.as_ref().ok_or_else(|| {
                    LeseError::SignedUrl("S3 client not initialized".to_string())
                })?;
                let path = ObjPath::from(location);
                Ok(s3.signed_url(Method::GET, &path, expires_in).await?)
            }
            StorageBackend::Local => {
                let base = self.local_base.as_ref().ok_or_else(|| {
                    LeseError::SignedUrl("local base directory not set".to_string())
                })?;
                Url::from_file_path(base.join(location)).map_err(|_| {
                    LeseError::SignedUrl(format!("cannot build file URL for {}", location))
                })
            }
            StorageBackend::Memory => Err(LeseError::SignedUrl(
                "memory backend does not support signed URLs".to_string(),
            )),
        }
    }
}

/// Resolve the absolute base directory for the local backend.
///
/// Tildes are expanded; a relative path is resolved against the current
/// working directory.
fn resolve_base_dir(data_dir: &str) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(data_dir).to_string());
    if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        values: Vec<f32>,
    }

    fn sample() -> Record {
        Record {
            name: "segment".to_string(),
            values: vec![0.25, 0.5],
        }
    }

    #[tokio::test]
    async fn test_memory_json_round_trip() {
        let store = BlobStore::memory();

        store.put_json("records/sample.json", &sample()).await.unwrap();
        let loaded: Record = store.get_json("records/sample.json").await.unwrap();
        assert_eq!(loaded, sample());
    }

    #[tokio::test]
    async fn test_exists() {
        let store = BlobStore::memory();
        assert!(!store.exists("missing.json").await.unwrap());

        store.put_json("present.json", &sample()).await.unwrap();
        assert!(store.exists("present.json").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_missing_blob_is_an_error() {
        let store = BlobStore::memory();
        let result: Result<Record> = store.get_json("missing.json").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_memory_backend_refuses_signed_urls() {
        let store = BlobStore::memory();
        let result = store
            .signed_url("lecture.mp4", Duration::from_secs(900))
            .await;
        assert!(matches!(result, Err(LeseError::SignedUrl(_))));
    }

    #[tokio::test]
    async fn test_local_backend_round_trip_and_file_url() {
        let dir = tempfile::tempdir().unwrap();
        let settings = StorageSettings {
            backend: StorageBackend::Local,
            data_dir: dir.path().to_string_lossy().to_string(),
            ..Default::default()
        };

        let store = BlobStore::from_settings(&settings).await.unwrap();
        store.put_json("media/answer.json", &sample()).await.unwrap();
        let loaded: Record = store.get_json("media/answer.json").await.unwrap();
        assert_eq!(loaded, sample());

        let url = store
            .signed_url("media/lecture.mp4", Duration::from_secs(900))
            .await
            .unwrap();
        assert_eq!(url.scheme(), "file");
        assert!(url.path().ends_with("media/lecture.mp4"));
    }

    #[tokio::test]
    async fn test_s3_backend_requires_bucket() {
        let settings = StorageSettings {
            backend: StorageBackend::S3,
            bucket: None,
            ..Default::default()
        };
        let result = BlobStore::from_settings(&settings).await;
        assert!(matches!(result, Err(LeseError::Config(_))));
    }
}
