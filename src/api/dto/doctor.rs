//! DTOs for doctor approval endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::DoctorProfile;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStatusResponse {
    pub is_approved: bool,
}

/// Body of `PUT /api/auth/update-document`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, message = "Government issued ID document is required"))]
    pub government_issued_id_document: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateDocumentResponse {
    pub message: String,
    pub doctor: DoctorProfile,
}
