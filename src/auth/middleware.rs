//! Axum state and extractors for the admin session.

use crate::auth::cookies::{read_cookie, ISSUED_AT_COOKIE, TOKEN_COOKIE};
use crate::auth::session::{SessionMarker, SessionValidator};
use crate::config::Config;
use crate::models::Navigation;
use axum::{extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use std::convert::Infallible;
use std::sync::Arc;

/// Application state shared across handlers.
///
/// Everything here is built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub navigation: Arc<Navigation>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let navigation = Navigation::new(&config.protected_prefix, &config.dashboard_path);
        AppState {
            config: Arc::new(config),
            navigation: Arc::new(navigation),
        }
    }

    pub fn validator(&self) -> SessionValidator {
        SessionValidator::new(self.config.secret_token.as_str())
    }
}

/// Session marker cookies extractor.
///
/// Never rejects: absent cookies simply yield an empty marker.
pub struct SessionCookies(pub SessionMarker);

impl SessionCookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        SessionCookies(SessionMarker {
            token: read_cookie(headers, TOKEN_COOKIE),
            issued_at: read_cookie(headers, ISSUED_AT_COOKIE),
        })
    }
}

impl<S> FromRequestParts<S> for SessionCookies
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionCookies::from_headers(&parts.headers))
    }
}
