//! Error types shared by the library and HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::InvalidRequest(message) => json!({
                "error": "invalid_request",
                "message": message,
            }),
            AppError::NotFound(message) => json!({
                "error": "not_found",
                "message": message,
            }),
            AppError::RateLimited => json!({
                "error": "rate_limited",
                "message": "Too many requests, slow down",
            }),
            AppError::Config(_) | AppError::Internal(_) => {
                // Details stay in the logs
                error!(error = %self, "Request failed with internal error");
                json!({
                    "message": "Internal server error",
                    "status": "error",
                    "support": "Check logs for details",
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
