//! Document storage trait and error types.

use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

/// Allowed characters of a single key segment.
static SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid segment regex"));

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Checks that a key is a relative path of plain segments.
///
/// Rejects empty keys, absolute keys, `.`/`..` segments and any character
/// outside `[A-Za-z0-9._-]`, so a key can never escape the storage root.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.starts_with('/') {
        return Err(StorageError::InvalidKey(key.to_string()));
    }

    for segment in key.split('/') {
        if segment == "." || segment == ".." || !SEGMENT_REGEX.is_match(segment) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
    }

    Ok(())
}

/// Storage backend for uploaded documents.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::LocalDocumentStorage`] - Files under a root directory
/// - [`crate::infrastructure::storage::MemoryDocumentStorage`] - In-process map for tests and development
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Stores `bytes` under `key`, replacing any previous object.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for keys rejected by [`validate_key`].
    async fn put(&self, key: &str, bytes: Vec<u8>) -> StorageResult<()>;

    /// Reads the object under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` if the object exists
    /// - `Ok(None)` if it does not
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Checks if the storage backend is usable.
    async fn health_check(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        assert!(validate_key("abc/license-1700000000000.pdf").is_ok());
        assert!(validate_key("doctor-documents/1700_scan.v2.pdf").is_ok());
    }

    #[test]
    fn test_invalid_keys() {
        for key in [
            "",
            "/etc/passwd",
            "../secret",
            "a/../../b",
            "a//b",
            "a/./b",
            "a/b c.pdf",
            "a\\b",
        ] {
            assert!(validate_key(key).is_err(), "accepted {key:?}");
        }
    }
}
