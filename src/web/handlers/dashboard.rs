//! Dashboard placeholder handler.

use axum::{Extension, Json, http::Uri};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Role;
use crate::domain::session::SessionClaims;

/// Identity and path as seen behind the gate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub path: String,
}

/// Reports the verified session and the canonical path it reached.
///
/// # Endpoints
///
/// - `GET /dashboard/{userId}/...`
/// - `GET /doctor-dashboard/{userId}/...`
/// - `GET /admin-dashboard/{userId}/...`
///
/// Only reachable through [`crate::web::middleware::session_gate`], which
/// inserts the [`SessionClaims`] extension.
pub async fn dashboard_handler(
    Extension(claims): Extension<SessionClaims>,
    uri: Uri,
) -> Json<DashboardView> {
    Json(DashboardView {
        user_id: claims.user_id,
        email: claims.email,
        role: claims.role,
        path: uri.path().to_string(),
    })
}
