//! DTOs for document upload and retrieval.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Document;

/// Body of `POST /api/file/upload`.
///
/// Every field is optional at the parsing level so that a missing or empty
/// one is reported as `"Missing required fields"` rather than a parse error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Base64-encoded file content.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub document_type: Option<String>,
}

impl UploadRequest {
    /// Returns `(file, user_id, document_type)` if all are present and non-empty.
    pub fn required(self) -> Option<(String, Uuid, String)> {
        let file = self.file.filter(|f| !f.trim().is_empty())?;
        let user_id = self.user_id?;
        let document_type = self.document_type.filter(|t| !t.trim().is_empty())?;
        Some((file, user_id, document_type))
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub document: Document,
}

/// Response of the public multipart upload.
#[derive(Debug, Serialize)]
pub struct PublicUploadResponse {
    /// Storage key to reference the file later.
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveQuery {
    pub document_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveResponse {
    pub signed_url: String,
}

/// Query of a signed download link.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub key: Option<String>,
    pub expires: Option<i64>,
    pub signature: Option<String>,
}
