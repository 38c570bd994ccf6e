//! API route configuration.
//!
//! Paths are absolute; the top-level router merges these groups without
//! nesting.

use crate::api::handlers::{
    approval_status_handler, download_handler, login_handler, logout_handler,
    public_upload_handler, register_handler, retrieve_handler, session_handler,
    update_document_handler, upload_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

/// Largest accepted upload body: 10 MiB.
pub const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Endpoints that accept credentials.
///
/// # Endpoints
///
/// - `POST /api/auth/login`    - Start a session
/// - `POST /api/auth/register` - Create a patient or doctor account
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/register", post(register_handler))
}

/// Endpoints open to anyone.
///
/// # Endpoints
///
/// - `POST /api/auth/logout`   - Clear the session cookie
/// - `POST /api/upload`        - Multipart upload before registration
/// - `GET  /api/file/download` - Signed-link download
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/logout", post(logout_handler))
        .route(
            "/api/upload",
            post(public_upload_handler).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/file/download", get(download_handler))
}

/// Endpoints requiring a session, protected by [`crate::api::middleware::auth`].
///
/// # Endpoints
///
/// - `GET  /api/auth/session`                          - Current identity
/// - `GET  /api/auth/doctor/approval-status/{userId}`  - Doctor approval flag
/// - `PUT  /api/auth/update-document`                  - Replace a doctor's ID document
/// - `POST /api/file/upload`                           - Base64 document upload
/// - `GET  /api/file/retrieve`                         - Signed download link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/session", get(session_handler))
        .route(
            "/api/auth/doctor/approval-status/{user_id}",
            get(approval_status_handler),
        )
        .route("/api/auth/update-document", put(update_document_handler))
        .route(
            "/api/file/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/file/retrieve", get(retrieve_handler))
}
