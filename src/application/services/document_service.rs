//! Document upload, lookup and signed download.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Document, NewDocument};
use crate::domain::repositories::DocumentRepository;
use crate::domain::session::SessionClaims;
use crate::error::AppError;
use crate::infrastructure::storage::{DocumentStorage, StorageError, validate_key};
use crate::utils::signed_url::UrlSigner;

/// Key prefix for files uploaded before an account exists.
pub const PUBLIC_UPLOAD_PREFIX: &str = "doctor-documents";

/// Service coordinating document metadata and stored bytes.
pub struct DocumentService {
    documents: Arc<dyn DocumentRepository>,
    storage: Arc<dyn DocumentStorage>,
    signer: UrlSigner,
}

impl DocumentService {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        storage: Arc<dyn DocumentStorage>,
        signer: UrlSigner,
    ) -> Self {
        Self {
            documents,
            storage,
            signer,
        }
    }

    /// Stores a base64-encoded PDF for `user_id` and records it.
    ///
    /// The object key is `<userId>/<documentType>-<unix millis>.pdf`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless `caller` owns `user_id` or is an admin.
    /// Returns [`AppError::Validation`] for undecodable content or a document
    /// type that cannot form a storage key.
    pub async fn upload(
        &self,
        caller: &SessionClaims,
        user_id: Uuid,
        document_type: &str,
        file_base64: &str,
    ) -> Result<Document, AppError> {
        if !caller.may_act_for(user_id) {
            return Err(AppError::forbidden(
                "Not allowed to upload for this user",
                json!({ "userId": user_id }),
            ));
        }

        let bytes = STANDARD.decode(file_base64.trim()).map_err(|_| {
            AppError::bad_request("Invalid file encoding", json!({ "file": ["not base64"] }))
        })?;

        let key = format!(
            "{user_id}/{document_type}-{}.pdf",
            Utc::now().timestamp_millis()
        );
        validate_key(&key).map_err(|_| {
            AppError::bad_request(
                "Invalid document type",
                json!({ "documentType": [document_type] }),
            )
        })?;

        self.storage.put(&key, bytes).await.map_err(storage_error)?;

        let document = self
            .documents
            .create(NewDocument {
                user_id,
                document_type: document_type.to_string(),
                file_path: key,
            })
            .await?;

        tracing::info!(document_id = %document.id, user_id = %user_id, "Document uploaded");
        Ok(document)
    }

    /// Stores a file that is not yet tied to an account and returns its key.
    ///
    /// Used during doctor registration, before the user exists. The original
    /// file name is reduced to `[A-Za-z0-9._-]`.
    pub async fn upload_unattached(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AppError> {
        let key = format!(
            "{PUBLIC_UPLOAD_PREFIX}/{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(file_name)
        );

        self.storage.put(&key, bytes).await.map_err(storage_error)?;

        Ok(key)
    }

    /// Returns a signed, time-limited download URL for a document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the document does not exist.
    /// Returns [`AppError::Forbidden`] unless `caller` owns it or is an admin.
    pub async fn signed_url(
        &self,
        caller: &SessionClaims,
        document_id: Uuid,
    ) -> Result<String, AppError> {
        let document = self
            .documents
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found", Value::Null))?;

        if !caller.may_act_for(document.user_id) {
            return Err(AppError::forbidden(
                "Not allowed to read this document",
                json!({ "documentId": document_id }),
            ));
        }

        Ok(self
            .signer
            .sign(&document.file_path, Utc::now().timestamp()))
    }

    /// Reads the bytes behind a signed URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] for a bad signature or an expired link.
    /// Returns [`AppError::NotFound`] if the object is gone.
    pub async fn download(
        &self,
        key: &str,
        expires: i64,
        signature: &str,
    ) -> Result<Vec<u8>, AppError> {
        if !self
            .signer
            .verify(key, expires, signature, Utc::now().timestamp())
        {
            return Err(AppError::forbidden("Invalid or expired link", Value::Null));
        }

        self.storage
            .get(key)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| AppError::not_found("Document not found", Value::Null))
    }

    /// Checks that the storage backend is usable.
    pub async fn storage_ready(&self) -> bool {
        self.storage.health_check().await
    }
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

fn storage_error(e: StorageError) -> AppError {
    match e {
        StorageError::InvalidKey(key) => {
            AppError::bad_request("Invalid storage key", json!({ "key": key }))
        }
        StorageError::Io(e) => {
            AppError::internal("Storage failure", json!({ "cause": e.to_string() }))
        }
    }
}
