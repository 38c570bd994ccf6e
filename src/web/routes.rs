//! Dashboard route configuration.

use crate::state::AppState;
use crate::web::gate::{ADMIN_TREE, API_TREE, DOCTOR_TREE, LOGIN_PATH, PATIENT_TREE};
use crate::web::handlers::{dashboard_handler, login_handler};
use axum::{Router, routing::get};

/// Routes guarded by [`crate::web::middleware::session_gate`].
///
/// Each tree is registered at its root and as a wildcard so the gate sees
/// every path inside it. Routes are absolute (no nesting) because the gate
/// matches on the full request path.
///
/// # Endpoints
///
/// - `GET /dashboard/...` - Patient dashboard
/// - `GET /doctor-dashboard/...` - Doctor dashboard
/// - `GET /admin-dashboard/...` - Admin dashboard
/// - `GET /apis/...` - Generic guarded tree, always redirected home
pub fn protected_routes() -> Router<AppState> {
    [PATIENT_TREE, DOCTOR_TREE, ADMIN_TREE, API_TREE]
        .into_iter()
        .fold(Router::new(), |router, tree| {
            router
                .route(tree, get(dashboard_handler))
                .route(&format!("{tree}/{{*rest}}"), get(dashboard_handler))
        })
}

/// Public browser routes.
///
/// # Endpoints
///
/// - `GET /login` - Login page
pub fn public_routes() -> Router<AppState> {
    Router::new().route(LOGIN_PATH, get(login_handler))
}
