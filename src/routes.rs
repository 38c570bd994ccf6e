//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /health`              - Health check: DB, storage (public)
//! - `GET  /login`               - Login page (public)
//! - `/api/auth/*`, `/api/file/*` - REST API (see [`crate::api::routes`])
//! - `/dashboard/*`, `/doctor-dashboard/*`, `/admin-dashboard/*`, `/apis/*`
//!   - Role dashboards behind the session gate
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - JSON 401 for the API, redirects for dashboards
//!
//! Trailing-slash normalization wraps this router in [`crate::server`].

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateLimit};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::session_gate;
use axum::routing::get;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - how clients are keyed for rate limiting;
///   [`RateLimit::Disabled`] in tests
pub fn app_router(state: AppState, rate_limit: RateLimit) -> Router {
    let credentials = rate_limit::secure(api::routes::credential_routes(), rate_limit);

    let api_protected = api::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), auth::layer),
    );

    let api_router = rate_limit::general(
        Router::new()
            .merge(api_protected)
            .merge(api::routes::public_routes()),
        rate_limit,
    );

    let dashboards = web::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), session_gate::layer),
    );

    let web_router = rate_limit::general(
        Router::new()
            .merge(dashboards)
            .merge(web::routes::public_routes()),
        rate_limit,
    );

    Router::new()
        .route("/health", get(health_handler))
        .merge(credentials)
        .merge(api_router)
        .merge(web_router)
        .with_state(state)
        .layer(tracing::layer())
}
