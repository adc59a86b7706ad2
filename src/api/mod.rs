//! REST API module.
//!
//! Contains all API routes and handlers. Every response uses the
//! `{success, data, message}` envelope; failures go through [`AppError`].

mod careers;
mod client_logos;
mod jobs;
mod status;

pub use careers::*;
pub use client_logos::*;
pub use jobs::*;
pub use status::*;

use axum::{
    extract::FromRequest,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, message: Option<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data, None))
}

/// Create a successful API response with a human-readable message.
pub fn success_with_message<T: Serialize>(data: T, message: &str) -> ApiResult<T> {
    Ok(ApiResponse::new(data, Some(message.to_string())))
}

/// Create a successful response that carries only a message.
pub fn done(message: &str) -> ApiResult<()> {
    Ok(ApiResponse {
        success: true,
        data: None,
        message: Some(message.to_string()),
    })
}

/// JSON body extractor whose rejections use the error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
