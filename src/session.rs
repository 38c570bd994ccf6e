//! Session token transport between client and server.
//!
//! The token travels in the `token` cookie. Login and registration also echo
//! it in two response headers for clients that keep their own copy. Every
//! server-side read goes through [`token_from_parts`].

use axum::extract::FromRequestParts;
use axum::http::{HeaderName, HeaderValue, request::Parts};
use axum_auth::AuthBearer;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

pub use crate::domain::session::SessionClaims;

/// Name of the cookie holding the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Response header mirroring the token for session-storage clients.
pub const SESSION_TOKEN_HEADER: &str = "set-session-token";

/// Response header mirroring the token for local-storage clients.
pub const LOCAL_TOKEN_HEADER: &str = "set-local-token";

/// Request header carrying the verified claims to downstream handlers.
pub const USER_HEADER: &str = "x-session-user";

/// Builds the session cookie for `token`.
///
/// HttpOnly, SameSite=Strict, Path=/, Max-Age of `ttl_seconds`. `secure`
/// adds the Secure attribute.
pub fn session_cookie(token: String, ttl_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(ttl_seconds))
        .path("/")
        .build()
}

/// Builds a cookie that overwrites the session cookie with an expired, empty one.
pub fn cleared_cookie() -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Strict)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .path("/")
        .build()
}

/// Reads the session token from a request.
///
/// The `token` cookie wins; `Authorization: Bearer` is accepted for API
/// clients that do not keep cookies. Empty values count as absent.
pub async fn token_from_parts(parts: &mut Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(TOKEN_COOKIE)
        && !cookie.value().is_empty()
    {
        return Some(cookie.value().to_string());
    }

    AuthBearer::from_request_parts(parts, &())
        .await
        .ok()
        .map(|AuthBearer(token)| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// The two compat headers carrying `token`, or clearing it when empty.
pub fn mirror_headers(token: &str) -> [(HeaderName, HeaderValue); 2] {
    let value = HeaderValue::from_str(token).unwrap_or_else(|_| HeaderValue::from_static(""));

    [
        (HeaderName::from_static(SESSION_TOKEN_HEADER), value.clone()),
        (HeaderName::from_static(LOCAL_TOKEN_HEADER), value),
    ]
}
