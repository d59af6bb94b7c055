//! Admin route gate and its security headers.
//!
//! Every request whose canonical path starts with the protected prefix (other
//! than the login path itself) goes through [`admin_gate`]. The canonical path
//! is the one the static file service resolves, so `//admin/x` and
//! `/%61dmin/x` are gated like `/admin/x`. In strict mode the request
//! must carry both session marker cookies and a token equal to the configured
//! secret, or it is redirected to the login path. Relaxed mode lets everything
//! through. Allowed requests get the admin security headers on the way out.
//!
//! The gate does not look at session age. Expiry is the session validator's
//! concern.

use crate::auth::middleware::{AppState, SessionCookies};
use crate::auth::session::SessionMarker;
use crate::config::Config;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use percent_encoding::percent_decode_str;

/// What the gate does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Not a gated path: forward untouched.
    PassThrough,
    /// Gated and allowed: forward and add the admin headers.
    Allow,
    /// Gated and refused: send the client to this location.
    Redirect(String),
}

/// Path as the router's static fallback resolves it.
///
/// Percent-decodes, drops empty segments (`//admin` reads as `/admin`) and
/// keeps a trailing slash. Returns `None` for `.` or `..` segments and for
/// bytes that do not decode to UTF-8.
pub fn canonical_path(raw: &str) -> Option<String> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;

    let mut canonical = String::with_capacity(decoded.len());
    for segment in decoded.split('/').filter(|s| !s.is_empty()) {
        if segment == "." || segment == ".." {
            return None;
        }
        canonical.push('/');
        canonical.push_str(segment);
    }
    if canonical.is_empty() || decoded.ends_with('/') {
        canonical.push('/');
    }

    Some(canonical)
}

/// Decide how to handle a request for `path` carrying `marker`.
///
/// A path that has no canonical form is gated whatever its prefix.
pub fn decide(config: &Config, path: &str, marker: &SessionMarker) -> GateDecision {
    let gated = match canonical_path(path) {
        Some(path) => path.starts_with(&config.protected_prefix) && path != config.login_path,
        None => true,
    };
    if !gated {
        return GateDecision::PassThrough;
    }

    if !config.mode.is_strict() {
        return GateDecision::Allow;
    }

    if marker.is_complete() && marker.token.as_deref() == Some(config.secret_token.as_str()) {
        GateDecision::Allow
    } else {
        GateDecision::Redirect(config.login_path.clone())
    }
}

/// Add the fixed admin response headers.
///
/// - **X-Frame-Options: DENY** disallows framing.
/// - **X-Content-Type-Options: nosniff** disables MIME sniffing.
/// - **Referrer-Policy: strict-origin-when-cross-origin**
/// - **Permissions-Policy** disables camera, microphone and geolocation.
/// - **X-RateLimit-Limit / X-RateLimit-Remaining** are advisory values only;
///   nothing counts requests.
pub fn apply_admin_headers(headers: &mut HeaderMap) {
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        "referrer-policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        "permissions-policy",
        HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
    );
    headers.insert("x-ratelimit-limit", HeaderValue::from_static("100"));
    headers.insert("x-ratelimit-remaining", HeaderValue::from_static("99"));
}

/// Middleware gating the protected prefix.
///
/// # Usage
///
/// ```rust,no_run
/// use axum::{middleware, Router};
/// use besties_admin::{auth::AppState, config::Config, middleware::admin_gate};
///
/// let state = AppState::new(Config::from_env().unwrap());
/// let app: Router = Router::new()
///     .layer(middleware::from_fn_with_state(state.clone(), admin_gate))
///     .with_state(state);
/// ```
pub async fn admin_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let SessionCookies(marker) = SessionCookies::from_headers(request.headers());

    match decide(&state.config, request.uri().path(), &marker) {
        GateDecision::PassThrough => next.run(request).await,
        GateDecision::Allow => {
            let mut response = next.run(request).await;
            apply_admin_headers(response.headers_mut());
            response
        }
        GateDecision::Redirect(location) => Redirect::temporary(&location).into_response(),
    }
}
