//! Repository trait for uploaded document metadata.

use crate::domain::entities::{Document, NewDocument};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for document references.
///
/// The file bytes live in [`crate::infrastructure::storage::DocumentStorage`];
/// this repository only records who uploaded what and under which key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Records a stored document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, document: NewDocument) -> Result<Document, AppError>;

    /// Finds a document by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError>;
}
