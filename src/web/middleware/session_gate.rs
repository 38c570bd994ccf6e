//! Session gate in front of the role dashboards.

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::session::{USER_HEADER, token_from_parts};
use crate::state::AppState;
use crate::web::gate::{self, GateDecision, LOGIN_PATH};

/// Verifies the session token and keeps each user inside their own tree.
///
/// # Flow
///
/// 1. Read the token (cookie, then `Authorization: Bearer`)
/// 2. Verify it; any failure is treated as no session
/// 3. Ask [`gate::decide`] where the request belongs
/// 4. Redirect with `307 Temporary Redirect`, or pass through
///
/// On pass-through any client-supplied `x-session-user` header is dropped
/// and replaced with the verified claims as JSON. The claims are also
/// inserted as a request extension for typed access.
///
/// Failures never produce an error body: the answer is always a redirect.
///
/// # Example
///
/// ```rust,ignore
/// let dashboards = web::routes::protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), session_gate::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();
    let claims = token_from_parts(&mut parts)
        .await
        .and_then(|token| st.token_service.verify(&token).ok());
    let mut req = Request::from_parts(parts, body);

    let decision = gate::decide(req.uri().path(), req.uri().query(), claims.as_ref());

    match decision {
        GateDecision::Login => {
            tracing::debug!(path = %req.uri().path(), "Gate: no valid session");
            metrics::counter!("gate_decisions_total", "outcome" => "login").increment(1);
            Redirect::temporary(LOGIN_PATH).into_response()
        }
        GateDecision::Redirect(target) => {
            tracing::debug!(path = %req.uri().path(), %target, "Gate: redirect");
            metrics::counter!("gate_decisions_total", "outcome" => "redirect").increment(1);
            Redirect::temporary(&target).into_response()
        }
        GateDecision::PassThrough => {
            // Decided PassThrough only with claims present.
            let Some(claims) = claims else {
                return Redirect::temporary(LOGIN_PATH).into_response();
            };

            let user_header = HeaderName::from_static(USER_HEADER);
            req.headers_mut().remove(&user_header);

            match serde_json::to_string(&claims)
                .ok()
                .and_then(|json| HeaderValue::from_str(&json).ok())
            {
                Some(value) => {
                    req.headers_mut().insert(user_header, value);
                }
                None => {
                    tracing::warn!(user_id = %claims.user_id, "Gate: claims not representable as header");
                }
            }

            tracing::debug!(user_id = %claims.user_id, path = %req.uri().path(), "Gate: pass");
            metrics::counter!("gate_decisions_total", "outcome" => "pass").increment(1);

            req.extensions_mut().insert(claims);
            next.run(req).await
        }
    }
}
