//! Handlers for doctor approval status and ID documents.

use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::doctor::{
    ApprovalStatusResponse, UpdateDocumentRequest, UpdateDocumentResponse,
};
use crate::domain::session::SessionClaims;
use crate::error::AppError;
use crate::state::AppState;

/// Reports whether a doctor has been approved.
///
/// # Endpoint
///
/// `GET /api/auth/doctor/approval-status/{userId}`
///
/// # Response
///
/// ```json
/// { "isApproved": false }
/// ```
///
/// # Errors
///
/// - 400 `"Invalid user ID"` if the path segment is not a UUID
/// - 404 `"Doctor not found"`
pub async fn approval_status_handler(
    State(st): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApprovalStatusResponse>, AppError> {
    let Path(user_id) = path.map_err(|e| {
        AppError::bad_request("Invalid user ID", json!({ "userId": e.body_text() }))
    })?;

    let is_approved = st.doctor_service.approval_status(user_id).await?;

    Ok(Json(ApprovalStatusResponse { is_approved }))
}

/// Replaces a doctor's government-issued ID document.
///
/// # Endpoint
///
/// `PUT /api/auth/update-document`
///
/// # Errors
///
/// - 400 `"Validation error"`
/// - 403 unless the caller is that doctor or an admin
/// - 404 `"Doctor not found"`
pub async fn update_document_handler(
    State(st): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    payload: Result<Json<UpdateDocumentRequest>, JsonRejection>,
) -> Result<Json<UpdateDocumentResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let doctor = st
        .doctor_service
        .update_document(&claims, req.user_id, req.government_issued_id_document)
        .await?;

    Ok(Json(UpdateDocumentResponse {
        message: "Document updated successfully".to_string(),
        doctor,
    }))
}
