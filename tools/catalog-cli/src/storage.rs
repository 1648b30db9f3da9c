//! Image storage in a local directory.

use std::path::PathBuf;

use async_trait::async_trait;
use catalog_backend::{BackendError, ObjectStorage};
use tokio::io::AsyncWriteExt;
use tracing::{event, Level};

/// Writes uploads into a directory. Public URLs use the configured base URL,
/// or a `file://` URL when none is set.
pub struct DirectoryStorage {
    root: PathBuf,
    public_base_url: Option<String>,
}

impl DirectoryStorage {
    pub fn new(root: PathBuf, public_base_url: Option<String>) -> Self {
        Self {
            root,
            public_base_url: public_base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    fn public_url(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base, key),
            None => format!("file://{}", self.root.join(key).display()),
        }
    }
}

#[async_trait]
impl ObjectStorage for DirectoryStorage {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError> {
        if key.is_empty() || key.contains('/') || key.contains('\\') {
            return Err(BackendError::UploadFailed(format!("invalid object key: {:?}", key)));
        }
        if bytes.is_empty() {
            return Err(BackendError::UploadFailed(format!("{}: empty file", key)));
        }

        let io_err = |e: std::io::Error| BackendError::UploadFailed(format!("{}: {}", key, e));
        tokio::fs::create_dir_all(&self.root).await.map_err(io_err)?;

        let path = self.root.join(key);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(io_err)?;
        file.write_all(&bytes).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;

        event!(Level::DEBUG, path = %path.display(), content_type, size = bytes.len(), "wrote image");
        Ok(self.public_url(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "catalog-cli-{}-{}-{}",
            name,
            std::process::id(),
            chrono::Utc::now().timestamp_micros()
        ))
    }

    #[tokio::test]
    async fn test_upload_writes_file_once() {
        let dir = temp_dir("upload");
        let storage = DirectoryStorage::new(dir.clone(), Some("https://cdn.test/img/".into()));

        let url = storage.upload("1-a.png", vec![1, 2], "image/png").await.unwrap();
        assert_eq!(url, "https://cdn.test/img/1-a.png");
        assert_eq!(std::fs::read(dir.join("1-a.png")).unwrap(), vec![1, 2]);

        assert!(storage.upload("1-a.png", vec![3], "image/png").await.is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_keys() {
        let storage = DirectoryStorage::new(temp_dir("keys"), None);
        assert!(storage.upload("../x.png", vec![1], "image/png").await.is_err());
    }
}
