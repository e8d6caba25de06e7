//! Domain error types for the admin gate.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::session::StoreError;

/// Path every denied request is sent to.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Session store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code, response_message) = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Store(err) => {
                tracing::error!("Session store error: {}", err);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "Session store unavailable".to_string(),
                )
            }
            AppError::InvalidInput(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
                self.to_string(),
            ),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_code.to_string(),
            message: response_message,
        })
    }
}

/// JSON error response body.
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

/// Denial of a guarded request, carried as a value.
///
/// Renders as `302 Found` to [`UNAUTHORIZED_PATH`] with an empty body, the
/// same for every cause so callers cannot tell why they were turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    location: &'static str,
}

impl Redirect {
    pub fn unauthorized() -> Self {
        Self {
            location: UNAUTHORIZED_PATH,
        }
    }

    pub fn location(&self) -> &'static str {
        self.location
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "redirect to {}", self.location)
    }
}

impl ResponseError for Redirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, self.location))
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}
