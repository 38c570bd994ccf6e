//! Handlers for login, registration, logout and session introspection.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::api::dto::auth::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
    SessionResponse,
};
use crate::domain::session::SessionClaims;
use crate::error::AppError;
use crate::session::{cleared_cookie, mirror_headers, session_cookie};
use crate::state::AppState;

/// Verifies credentials and starts a session.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Request Body
///
/// ```json
/// { "email": "ada@example.com", "password": "secret" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Signin successful",
///   "userId": "5f0c...",
///   "role": "PATIENT",
///   "token": "eyJ..."
/// }
/// ```
///
/// Also sets the `token` cookie and the `Set-Session-Token` /
/// `Set-Local-Token` headers.
///
/// # Errors
///
/// - 400 `"Validation error"` for a malformed body
/// - 401 `"Invalid email or password"`, whatever the cause
/// - 500 `"An error occurred during signin"`
pub async fn login_handler(
    State(st): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let outcome = st
        .auth_service
        .login(req.email.trim(), &req.password)
        .await
        .map_err(|e| e.with_internal_message("An error occurred during signin"))?;

    let jar = jar.add(session_cookie(
        outcome.token.clone(),
        st.token_service.ttl_seconds(),
        st.cookie_secure,
    ));

    Ok((
        jar,
        mirror_headers(&outcome.token),
        Json(LoginResponse {
            message: "Signin successful".to_string(),
            user_id: outcome.user.id,
            role: outcome.user.role,
            token: outcome.token,
        }),
    ))
}

/// Registers a patient or doctor and starts a session.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// The body is discriminated on `role` (`PATIENT` or `DOCTOR`); see
/// [`RegisterRequest`] for the fields of each.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "message": "User registered successfully", "userId": "5f0c...", "role": "DOCTOR" }
/// ```
///
/// # Errors
///
/// - 400 `"Validation error"` for malformed or invalid fields, including an
///   unsupported role
/// - 400 `"Email already exists"` / `"Phone number already exists"`
/// - 500 `"An error occurred during registration"`
pub async fn register_handler(
    State(st): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let (account, password, profile) = req.into_parts();
    let outcome = st
        .auth_service
        .register(account, password, profile)
        .await
        .map_err(|e| e.with_internal_message("An error occurred during registration"))?;

    let jar = jar.add(session_cookie(
        outcome.token.clone(),
        st.token_service.ttl_seconds(),
        st.cookie_secure,
    ));

    Ok((
        StatusCode::CREATED,
        jar,
        mirror_headers(&outcome.token),
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: outcome.user.id,
            role: outcome.user.role,
        }),
    ))
}

/// Ends the session on the client.
///
/// # Endpoint
///
/// `POST /api/auth/logout`
///
/// Overwrites the `token` cookie with an empty, already expired one and
/// blanks both mirror headers. Tokens are stateless, so a copy kept elsewhere
/// stays valid until it expires.
pub async fn logout_handler(jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(cleared_cookie()),
        mirror_headers(""),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Returns the identity behind the current session.
///
/// # Endpoint
///
/// `GET /api/auth/session`
///
/// Requires [`crate::api::middleware::auth`].
pub async fn session_handler(Extension(claims): Extension<SessionClaims>) -> Json<SessionResponse> {
    Json(SessionResponse {
        user_id: claims.user_id,
        email: claims.email,
        role: claims.role,
    })
}
