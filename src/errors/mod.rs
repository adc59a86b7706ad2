//! Error handling module for the Blufacade backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const AUTH_NOT_CONFIGURED: &str = "AUTH_NOT_CONFIGURED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const PAYLOAD_TOO_LARGE: &str = "PAYLOAD_TOO_LARGE";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Missing, malformed or rejected bearer token
    Unauthorized(String),
    /// The server has no token secret to verify against
    AuthNotConfigured(String),
    /// Resource not found
    NotFound(String),
    /// Missing or invalid field
    Validation(String),
    /// Uniqueness constraint violated (client logo order)
    Conflict(String),
    /// Database error
    Database(String),
    /// Image host failure
    Upstream(String),
    /// Internal server error
    Internal(String),
    /// Unreadable request body
    BadRequest(String),
    /// Request body over the configured size cap
    PayloadTooLarge(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthNotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::AuthNotConfigured(_) => codes::AUTH_NOT_CONFIGURED,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Conflict(_) => codes::CONFLICT,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Upstream(_) => codes::UPSTREAM_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => codes::PAYLOAD_TOO_LARGE,
        }
    }

    /// Get the error message, including internal detail.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::AuthNotConfigured(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::Database(msg) => msg.clone(),
            AppError::Upstream(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::PayloadTooLarge(msg) => msg.clone(),
        }
    }

    /// Message safe to hand to clients. Server-side failures are reported
    /// generically; their detail only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) => "Database operation failed".to_string(),
            AppError::Upstream(_) => "Image host request failed".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            _ => self.message(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Image host error: {:?}", err);
        AppError::Upstream(format!("Image host error: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(err.body_text());
        }
        AppError::BadRequest(format!("Invalid form data: {}", err.body_text()))
    }
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            message: error.public_message(),
            error: error.error_code().to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(ErrorResponse::new(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_bad_request() {
        let err = AppError::Conflict("A client logo with order 3 already exists".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), codes::CONFLICT);
    }

    #[test]
    fn test_missing_secret_is_server_error() {
        let err = AppError::AuthNotConfigured("JWT secret not configured".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_detail_not_exposed() {
        let err = AppError::Upstream("Image host error: 401 invalid api_key abc123".to_string());
        let body = ErrorResponse::new(&err);
        assert!(!body.success);
        assert_eq!(body.error, codes::UPSTREAM_ERROR);
        assert!(!body.message.contains("abc123"));
    }

    #[test]
    fn test_payload_too_large_keeps_status() {
        let err = AppError::PayloadTooLarge("Request payload is too large".to_string());
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = ErrorResponse::new(&err);
        assert_eq!(body.error, codes::PAYLOAD_TOO_LARGE);
        assert_eq!(body.message, "Request payload is too large");
    }

    #[test]
    fn test_validation_message_passed_through() {
        let err = AppError::Validation("title is required and cannot be empty".to_string());
        let body = ErrorResponse::new(&err);
        assert_eq!(body.message, "title is required and cannot be empty");
        assert_eq!(body.error, codes::VALIDATION_ERROR);
    }
}
