//! Session authentication for API endpoints.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::{error::AppError, session::token_from_parts, state::AppState};

/// Requires a valid session and exposes its claims to the handler.
///
/// # Token Sources
///
/// ```text
/// Cookie: token=<jwt>
/// Authorization: Bearer <jwt>
/// ```
///
/// The cookie wins when both are present.
///
/// # Authentication Flow
///
/// 1. Extract the token
/// 2. Verify signature and expiry via [`crate::application::services::TokenService`]
/// 3. Insert the [`crate::domain::session::SessionClaims`] as a request extension
/// 4. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` with:
/// - `"Not authenticated"` if no token was sent
/// - `"Invalid token"` if verification fails
///
/// Unlike [`crate::web::middleware::session_gate`], which redirects browsers,
/// API callers get a JSON error.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/api/auth/session", get(session_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = token_from_parts(&mut parts)
        .await
        .ok_or_else(|| AppError::unauthorized("Not authenticated", Value::Null))?;

    let claims = st.token_service.verify(&token)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
