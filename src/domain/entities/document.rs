//! Uploaded document metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Reference to an object held by the document storage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub document_type: String,
    /// Storage key, relative to the storage root.
    #[serde(rename = "fileUrl")]
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub user_id: Uuid,
    pub document_type: String,
    pub file_path: String,
}
