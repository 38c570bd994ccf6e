//! Filesystem-backed document storage.

use super::service::{DocumentStorage, StorageResult, validate_key};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Stores documents as files below a root directory.
///
/// Keys map directly to relative paths; intermediate directories are created
/// on write.
pub struct LocalDocumentStorage {
    root: PathBuf,
}

impl LocalDocumentStorage {
    /// Opens storage at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::Io`] if the directory cannot be created.
    pub async fn open(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        info!("Document storage at {}", root.display());
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl DocumentStorage for LocalDocumentStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> StorageResult<()> {
        let path = self.path_for(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, bytes).await?;
        debug!("Stored document {}", key);
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn health_check(&self) -> bool {
        fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}
