//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed")]
    InvalidFields(Vec<FieldError>),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl AppError {
    /// Translate a write error, mapping constraint violations to client errors.
    ///
    /// Unique violations become `Conflict(conflict)`, foreign-key violations
    /// become `NotFound(missing)`. Everything else stays a database error.
    pub fn from_write(e: sqlx::Error, conflict: &str, missing: &str) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(conflict.to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound(missing.to_string())
            }
            _ => AppError::Database(e),
        }
    }

    /// HTTP status this error renders with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) | AppError::InvalidFields(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) | AppError::Database(_) | AppError::Redis(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message, errors) = match self {
            AppError::NotFound(msg) => (10001, msg, None),
            AppError::BadRequest(msg) => (10002, msg, None),
            AppError::Unauthorized(msg) => (10003, msg, None),
            AppError::Forbidden(msg) => (10004, msg, None),
            AppError::Conflict(msg) => (10005, msg, None),
            AppError::RateLimited => (10006, "Rate limited".into(), None),
            AppError::Validation(msg) => (10007, msg, None),
            AppError::InvalidFields(fields) => {
                let message = fields
                    .first()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .unwrap_or_else(|| "Validation failed".into());
                (10007, message, Some(fields))
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (10000, "Internal server error".into(), None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (10000, "Internal server error".into(), None)
            }
            AppError::Redis(e) => {
                tracing::error!("Redis error: {}", e);
                (10000, "Internal server error".into(), None)
            }
        };

        let body = ErrorResponse {
            code,
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}
