//! Admin console endpoints (behind the admin gate).

use crate::auth::middleware::AppState;
use crate::models::DashboardResponse;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Json,
};

const CONSOLE_TITLE: &str = "Music Besties";

/// GET /admin: Console root, forwards to the dashboard
pub async fn console_root(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.config.dashboard_path)
}

/// GET /admin/dashboard: Dashboard entry point
pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    Json(DashboardResponse {
        title: CONSOLE_TITLE,
        environment: state.config.mode.environment(),
        navigation: &state.navigation,
    })
    .into_response()
}
