//! Error types for Postboard
//!
//! All errors in the application are converted to `AppError`,
//! which implements `IntoResponse` for proper HTTP error responses.
//!
//! "Not found" is deliberately absent: lookups return `Option` and the
//! HTTP layer answers an absent record with 200 and an empty body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or rejected input (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource already exists (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Credentials did not match (401)
    #[error("Authentication failed")]
    Unauthorized,

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl AppError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Conflict(_) => "conflict",
            AppError::Unauthorized => "unauthorized",
            AppError::Database(_) => "database",
            AppError::Config(_) => "config",
            AppError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    /// Convert error to HTTP response
    ///
    /// The status code is the whole answer: the body is always empty.
    /// Server-side failures are logged, client errors only at debug.
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::Validation(_) | AppError::Conflict(_) | AppError::Unauthorized => {
                tracing::debug!(%status, error = %self, "rejected request");
            }
            AppError::Database(error) => {
                tracing::error!(%error, "database failure while serving request");
            }
            AppError::Config(message) => {
                tracing::error!(%message, "configuration failure while serving request");
            }
            AppError::Internal(error) => {
                tracing::error!(%error, "internal failure while serving request");
            }
        }

        crate::metrics::ERRORS_TOTAL
            .with_label_values(&[self.error_type()])
            .inc();

        status.into_response()
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
