//! Login page handler.

use axum::response::Html;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
<form id="login" method="post" action="/api/auth/login">
  <input name="email" type="email" placeholder="Email" required>
  <input name="password" type="password" placeholder="Password" required>
  <button type="submit">Sign in</button>
</form>
</body>
</html>
"#;

/// Serves the login page the gate redirects to.
///
/// # Endpoint
///
/// `GET /login`
pub async fn login_handler() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}
