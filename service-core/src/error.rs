use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A query against the document store failed. The first field is the
    /// caller-facing message; the wrapped error is only ever logged.
    #[error("Storage failure ({0}): {1}")]
    StorageFailure(String, anyhow::Error),

    #[error("Startup failure: {0}")]
    StartupFailure(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Service Unavailable")]
    ServiceUnavailable,

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn storage(message: impl Into<String>, err: impl Into<anyhow::Error>) -> Self {
        AppError::StorageFailure(message.into(), err.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::StorageFailure(..)
            | AppError::StartupFailure(_)
            | AppError::InternalError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::StorageFailure("Database error".to_string(), anyhow::Error::new(err))
    }
}

/// Error body returned to clients. Carries a fixed message only; underlying
/// causes stay in the server log.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AppError::NotFound(message) => message,
            AppError::StorageFailure(message, _) => message,
            AppError::ServiceUnavailable => "Service unavailable".to_string(),
            AppError::StartupFailure(_) | AppError::InternalError(_) => {
                "Internal server error".to_string()
            }
            AppError::ConfigError(_) => "Configuration error".to_string(),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
