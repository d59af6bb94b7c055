//! Reading and writing the session marker cookies.
//!
//! Cookie names:
//! - `admin-token`: the opaque secret token
//! - `admin-session`: issue time in epoch milliseconds
//!
//! Both are written with `Path=/; Secure; SameSite=Strict`.

use axum::http::{header, HeaderMap, HeaderValue};

pub const TOKEN_COOKIE: &str = "admin-token";
pub const ISSUED_AT_COOKIE: &str = "admin-session";

const COOKIE_ATTRIBUTES: &str = "Path=/; Secure; SameSite=Strict";

const CLEAR_TOKEN_COOKIE: &str =
    "admin-token=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/; Secure; SameSite=Strict";
const CLEAR_ISSUED_AT_COOKIE: &str =
    "admin-session=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/; Secure; SameSite=Strict";

/// Find a cookie value across all `Cookie` headers.
///
/// The first occurrence wins. Empty values are reported as absent, so a
/// cookie that was cleared reads the same as one that was never set.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Build a `Set-Cookie` value for a session marker cookie.
pub fn session_cookie(name: &str, value: &str) -> Result<HeaderValue, header::InvalidHeaderValue> {
    HeaderValue::from_str(&format!("{}={}; {}", name, value, COOKIE_ATTRIBUTES))
}

/// `Set-Cookie` pair that expires both marker cookies, token first.
pub fn clear_session_cookies() -> [(header::HeaderName, HeaderValue); 2] {
    [
        (
            header::SET_COOKIE,
            HeaderValue::from_static(CLEAR_TOKEN_COOKIE),
        ),
        (
            header::SET_COOKIE,
            HeaderValue::from_static(CLEAR_ISSUED_AT_COOKIE),
        ),
    ]
}
