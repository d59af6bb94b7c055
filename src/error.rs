//! Error types and Axum response conversions.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message shown for any unexpected failure during login.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Application error types.
///
/// Missing, mismatched or expired sessions are not errors: the gate answers
/// those with redirects. These variants cover everything that does reach a
/// handler's `Result`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Login failed: {0}")]
    LoginFailed(String),
}

impl AppError {
    /// Status code and client-facing message.
    ///
    /// Internal details are logged here and never returned.
    pub fn into_public(self) -> (StatusCode, String) {
        match self {
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::LoginFailed(msg) => {
                tracing::error!(error = %msg, "Login failed unexpectedly");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    LOGIN_FAILED_MESSAGE.to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.into_public();

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<std::time::SystemTimeError> for AppError {
    fn from(err: std::time::SystemTimeError) -> Self {
        AppError::Internal(format!("Clock error: {}", err))
    }
}

impl From<axum::http::header::InvalidHeaderValue> for AppError {
    fn from(err: axum::http::header::InvalidHeaderValue) -> Self {
        AppError::Internal(format!("Header encoding error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    /// Extract status code and JSON body from an AppError response.
    async fn error_response(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_internal_hides_details() {
        let (status, body) = error_response(AppError::Internal(
            "Clock error: second time provided was later than self".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(!body["error"].as_str().unwrap().contains("Clock"));
    }

    #[tokio::test]
    async fn test_login_failed_is_generic() {
        let (status, body) = error_response(AppError::LoginFailed(
            "Header encoding error: failed to parse header value".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Login failed. Please try again.");
    }

    #[tokio::test]
    async fn test_bad_request() {
        let (status, body) =
            error_response(AppError::BadRequest("Invalid form".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid form");
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let (status, body) =
            error_response(AppError::Unauthorized("Invalid credentials".to_string())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
    }

    #[test]
    fn test_from_invalid_header_value() {
        let header_err = axum::http::HeaderValue::from_str("bad\nvalue").unwrap_err();
        let app_err = AppError::from(header_err);
        match app_err {
            AppError::Internal(msg) => assert!(msg.contains("Header encoding error")),
            _ => panic!("Expected Internal variant"),
        }
    }

    #[test]
    fn test_from_system_time_error() {
        let later = std::time::UNIX_EPOCH + std::time::Duration::from_secs(10);
        let time_err = std::time::UNIX_EPOCH.duration_since(later).unwrap_err();
        let app_err = AppError::from(time_err);
        match app_err {
            AppError::Internal(msg) => assert!(msg.contains("Clock error")),
            _ => panic!("Expected Internal variant"),
        }
    }
}
