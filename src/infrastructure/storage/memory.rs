//! In-memory document storage for testing or storage-less development.

use super::service::{DocumentStorage, StorageResult, validate_key};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// A storage implementation that keeps objects in a map.
///
/// Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryDocumentStorage {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryDocumentStorage {
    pub fn new() -> Self {
        debug!("Using MemoryDocumentStorage (documents are not persisted)");
        Self::default()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStorage for MemoryDocumentStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> StorageResult<()> {
        validate_key(key)?;
        self.objects.write().await.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.objects.read().await.get(key).cloned())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_and_len() {
        let storage = MemoryDocumentStorage::new();
        assert!(storage.is_empty().await);

        storage.put("a/b.pdf", vec![1, 2, 3]).await.unwrap();

        assert_eq!(storage.len().await, 1);
        assert_eq!(storage.get("a/b.pdf").await.unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(storage.get("a/c.pdf").await.unwrap(), None);
    }
}
