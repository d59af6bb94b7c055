//! Admin login, logout, and session endpoints.

use crate::auth::cookies::{clear_session_cookies, session_cookie, ISSUED_AT_COOKIE, TOKEN_COOKIE};
use crate::auth::middleware::{AppState, SessionCookies};
use crate::auth::session::{now_millis, SessionStatus};
use crate::error::AppError;
use crate::models::{LoginRequest, SecurityStatus, SessionResponse};
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, Uri},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use std::time::SystemTimeError;

/// Shown for any rejected username/password pair.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

const LOGIN_FORM_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Music Besties Admin</title></head>
<body>
"#;

const LOGIN_FORM_BODY: &str = r#"<form method="post">
<label>Username <input name="username" autocomplete="username" required></label>
<label>Password <input name="password" type="password" autocomplete="current-password" required></label>
<button type="submit">Sign In</button>
</form>
</body>
</html>
"#;

/// Render the login form, with `error` shown above it when present.
fn login_form(error: Option<&str>) -> String {
    let mut html = String::from(LOGIN_FORM_HEAD);
    if let Some(error) = error {
        html.push_str(r#"<p class="error" role="alert">"#);
        html.push_str(&escape_html(error));
        html.push_str("</p>\n");
    }
    html.push_str(LOGIN_FORM_BODY);
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Whether the client asked for an HTML page (a browser form post).
fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// GET /admin/login: Login form
pub async fn login_page() -> Html<String> {
    Html(login_form(None))
}

/// POST /admin/login: Exchange credentials for session cookies
///
/// On success sets `admin-token` and `admin-session` and redirects (303) to
/// the dashboard. Wrong username and wrong password are indistinguishable.
/// Failures re-render the form with the message for browsers (`Accept:
/// text/html`) and are JSON errors otherwise.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<LoginRequest>, FormRejection>,
) -> Result<Response, AppError> {
    let result = form
        .map_err(|e| AppError::BadRequest(format!("Username and password are required: {}", e)))
        .and_then(|Form(req)| {
            let cookies = authenticate(&state, &req, now_millis)?;
            tracing::info!(action = "login_success", username = %req.username, "Admin logged in");
            Ok(cookies)
        });

    match result {
        Ok(cookies) => Ok((
            AppendHeaders(cookies),
            Redirect::to(&state.config.dashboard_path),
        )
            .into_response()),
        Err(err) if wants_html(&headers) => {
            let (status, message) = err.into_public();
            Ok((status, Html(login_form(Some(&message)))).into_response())
        }
        Err(err) => Err(err),
    }
}

/// Check the submitted credentials and mint the session cookies, reading the
/// time from `clock`.
fn authenticate<F>(
    state: &AppState,
    req: &LoginRequest,
    clock: F,
) -> Result<[(HeaderName, HeaderValue); 2], AppError>
where
    F: FnOnce() -> Result<i64, SystemTimeError>,
{
    if !state
        .config
        .credentials
        .matches(&req.username, req.password.as_str())
    {
        tracing::warn!(action = "login_failed", username = %req.username, "Invalid credentials");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    mint_session_cookies(state, clock).map_err(|e| AppError::LoginFailed(e.to_string()))
}

/// Build the two `Set-Cookie` headers for a fresh session.
fn mint_session_cookies<F>(
    state: &AppState,
    clock: F,
) -> Result<[(HeaderName, HeaderValue); 2], AppError>
where
    F: FnOnce() -> Result<i64, SystemTimeError>,
{
    let session = state.validator().mint(clock()?);
    Ok([
        (
            header::SET_COOKIE,
            session_cookie(TOKEN_COOKIE, &session.token_value)?,
        ),
        (
            header::SET_COOKIE,
            session_cookie(ISSUED_AT_COOKIE, &session.issued_at.to_string())?,
        ),
    ])
}

/// POST /api/admin/logout: Clear the session marker
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!(action = "logout", "Admin logged out");

    (
        AppendHeaders(clear_session_cookies()),
        Redirect::to(&state.config.login_path),
    )
}

/// GET /api/admin/session: Check the session marker
///
/// Returns `unauthenticated`, `valid`, or `expired`. An expired session also
/// gets both cookies cleared so the next check is `unauthenticated`. Relaxed
/// mode always reports `valid`.
pub async fn session_status(
    State(state): State<AppState>,
    SessionCookies(marker): SessionCookies,
) -> Result<Response, AppError> {
    if !state.config.mode.is_strict() {
        return Ok(Json(SessionResponse {
            status: SessionStatus::Valid,
        })
        .into_response());
    }

    let status = state.validator().validate(&marker, now_millis()?);
    let body = Json(SessionResponse { status });

    if status == SessionStatus::Expired {
        return Ok((AppendHeaders(clear_session_cookies()), body).into_response());
    }

    Ok(body.into_response())
}

/// GET /api/admin/security: Security overview for the console status bar
pub async fn security_status(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    SessionCookies(marker): SessionCookies,
) -> Result<Json<SecurityStatus>, AppError> {
    let https = uri.scheme_str() == Some("https")
        || headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|proto| proto.eq_ignore_ascii_case("https"));

    let session_valid = state.validator().validate(&marker, now_millis()?) == SessionStatus::Valid;

    Ok(Json(SecurityStatus {
        environment: state.config.mode.environment(),
        https,
        security_headers: true,
        session_valid,
    }))
}
