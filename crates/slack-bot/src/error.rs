//! Application error types.

use crate::signature::SignatureError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use image_registry::RegistryError;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request signature: {0}")]
    Signature(#[from] SignatureError),

    #[error("Malformed event payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Command timed out after {0:?}")]
    Timeout(Duration),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Signature(_) => (StatusCode::UNAUTHORIZED, "INVALID_SIGNATURE"),
            AppError::Parse(_) => (StatusCode::BAD_REQUEST, "MALFORMED_PAYLOAD"),
            AppError::Registry(_) => (StatusCode::INTERNAL_SERVER_ERROR, "REGISTRY_ERROR"),
            AppError::Timeout(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TIMEOUT"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Internal details stay in the log
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            warn!("Request rejected: {}", self);
            self.to_string()
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
