//! Object storage for product images.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{event, instrument, Level};

use crate::BackendError;

/// Bucket-like file storage.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `key` and return a publicly resolvable URL.
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError>;
}

/// Build a unique object key: `<timestamp_ms>-<sanitized file name>`.
///
/// Characters outside `[A-Za-z0-9._-]` become `_`.
pub fn object_key(file_name: &str, timestamp_ms: i64) -> String {
    let sanitized: String = file_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let sanitized = if sanitized.is_empty() {
        "upload".to_string()
    } else {
        sanitized
    };
    format!("{}-{}", timestamp_ms, sanitized)
}

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Object storage held in memory. Keys are write-once.
#[derive(Debug)]
pub struct MemoryObjectStorage {
    public_base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryObjectStorage {
    /// Create storage whose public URLs start with `public_base_url`.
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Public URL for a key.
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    /// Fetch a stored object.
    pub async fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError> {
        if key.is_empty() {
            return Err(BackendError::UploadFailed("empty object key".to_string()));
        }
        if bytes.is_empty() {
            return Err(BackendError::UploadFailed(format!("{}: empty file", key)));
        }

        let mut objects = self.objects.write().await;
        if objects.contains_key(key) {
            return Err(BackendError::UploadFailed(format!("{}: already exists", key)));
        }
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        event!(Level::DEBUG, "stored object");
        Ok(self.public_url(key))
    }
}
