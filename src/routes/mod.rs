//! HTTP route handlers and router assembly.

pub mod admin;
pub mod auth;

use crate::auth::middleware::AppState;
use crate::middleware::admin_gate;
use axum::{routing::get, routing::post, Router};
use tower_http::services::ServeDir;

/// Build the router with all endpoints.
///
/// Admin console routes are mounted under the configured protected prefix;
/// the session API lives outside it so the gate never redirects it.
pub fn api_router(state: &AppState) -> Router<AppState> {
    let config = &state.config;
    Router::new()
        // Login surface (exempt from the gate)
        .route(&config.login_path, get(auth::login_page).post(auth::login))
        // Session API
        .route("/api/admin/session", get(auth::session_status))
        .route("/api/admin/security", get(auth::security_status))
        .route("/api/admin/logout", post(auth::logout))
        // Admin console
        .route(&config.protected_prefix, get(admin::console_root))
        .route(&config.dashboard_path, get(admin::dashboard))
}

/// Full application: routes, static fallback, and the admin gate.
///
/// The gate is layered last so it also covers static files served from
/// under the protected prefix, however the path is spelled (`//admin/x`,
/// `/%61dmin/x`).
pub fn app(state: AppState) -> Router {
    api_router(&state)
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            admin_gate,
        ))
        .with_state(state)
}
