//! Handlers for document upload, signed retrieval and download.

use axum::{
    Extension, Json,
    extract::{
        Multipart, Query, State,
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::api::dto::files::{
    DownloadQuery, PublicUploadResponse, RetrieveQuery, RetrieveResponse, UploadRequest,
    UploadResponse,
};
use crate::domain::session::SessionClaims;
use crate::error::AppError;
use crate::state::AppState;

/// Uploads a base64-encoded document for a user.
///
/// # Endpoint
///
/// `POST /api/file/upload`
///
/// # Request Body
///
/// ```json
/// { "file": "JVBERi0...", "userId": "5f0c...", "documentType": "license" }
/// ```
///
/// # Errors
///
/// - 400 `"Missing required fields"` if any field is absent or empty
/// - 400 `"Invalid file encoding"` if `file` is not base64
/// - 403 unless the caller owns `userId` or is an admin
pub async fn upload_handler(
    State(st): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let Json(req) = payload?;
    let (file, user_id, document_type) = req
        .required()
        .ok_or_else(|| AppError::bad_request("Missing required fields", Value::Null))?;

    let document = st
        .document_service
        .upload(&claims, user_id, &document_type, &file)
        .await
        .map_err(|e| e.with_internal_message("Failed to upload document"))?;

    Ok(Json(UploadResponse {
        message: "Document uploaded successfully".to_string(),
        document,
    }))
}

/// Stores a file before its owner has an account.
///
/// # Endpoint
///
/// `POST /api/upload` (multipart, field `file`)
///
/// Used by doctor registration to upload the ID document first and send its
/// key as `governmentIssuedIdDocument`.
///
/// # Response
///
/// ```json
/// { "url": "doctor-documents/1718000000000_id.pdf" }
/// ```
///
/// A request without a `file` part is answered with
/// `400 {"error": "No file uploaded"}`.
pub async fn public_upload_handler(
    State(st): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let Ok(mut multipart) = multipart else {
        return Ok(no_file());
    };

    // A malformed body ends the scan like a missing part.
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            AppError::bad_request("Invalid upload", json!({ "cause": e.body_text() }))
        })?;
        if bytes.is_empty() {
            return Ok(no_file());
        }

        let url = st
            .document_service
            .upload_unattached(&file_name, bytes.to_vec())
            .await?;

        tracing::info!(key = %url, "Unattached document uploaded");
        return Ok(Json(PublicUploadResponse { url }).into_response());
    }

    Ok(no_file())
}

fn no_file() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "No file uploaded" })),
    )
        .into_response()
}

/// Issues a short-lived signed download URL for a document.
///
/// # Endpoint
///
/// `GET /api/file/retrieve?documentId=<uuid>`
///
/// # Response
///
/// ```json
/// { "signedUrl": "/api/file/download?key=...&expires=...&signature=..." }
/// ```
///
/// # Errors
///
/// - 400 `"Document ID is required"`
/// - 403 unless the caller owns the document or is an admin
/// - 404 `"Document not found"`
pub async fn retrieve_handler(
    State(st): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    query: Result<Query<RetrieveQuery>, QueryRejection>,
) -> Result<Json<RetrieveResponse>, AppError> {
    let document_id = query
        .ok()
        .and_then(|Query(q)| q.document_id)
        .ok_or_else(|| AppError::bad_request("Document ID is required", Value::Null))?;

    let signed_url = st
        .document_service
        .signed_url(&claims, document_id)
        .await
        .map_err(|e| e.with_internal_message("Failed to retrieve document"))?;

    Ok(Json(RetrieveResponse { signed_url }))
}

/// Serves the bytes behind a signed URL.
///
/// # Endpoint
///
/// `GET /api/file/download?key=&expires=&signature=`
///
/// No session is needed: the signature is the authorization.
///
/// # Errors
///
/// - 403 `"Invalid or expired link"` for a missing, bad or expired signature
/// - 404 `"Document not found"`
pub async fn download_handler(
    State(st): State<AppState>,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let invalid = || AppError::forbidden("Invalid or expired link", Value::Null);

    let Query(q) = query.map_err(|_| invalid())?;
    let (Some(key), Some(expires), Some(signature)) = (q.key, q.expires, q.signature) else {
        return Err(invalid());
    };

    let bytes = st
        .document_service
        .download(&key, expires, &signature)
        .await?;

    let content_type = if key.ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    };

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
