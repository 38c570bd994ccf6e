//! PostgreSQL implementation of the document repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Document, NewDocument};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    user_id: Uuid,
    document_type: String,
    file_path: String,
    created_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            user_id: row.user_id,
            document_type: row.document_type,
            file_path: row.file_path,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for document references.
pub struct PgDocumentRepository {
    pool: Arc<PgPool>,
}

impl PgDocumentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn create(&self, document: NewDocument) -> Result<Document, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (user_id, document_type, file_path)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, document_type, file_path, created_at
            "#,
        )
        .bind(document.user_id)
        .bind(&document.document_type)
        .bind(&document.file_path)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, user_id, document_type, file_path, created_at
            FROM documents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Document::from))
    }
}
