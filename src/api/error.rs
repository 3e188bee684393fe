//! API error type and its HTTP mapping.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinError;

use crate::logs::LogError;
use crate::probe::ProbeError;

/// Errors surfaced to API clients as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Map a failure to list the sites directory.
    pub fn sites_directory(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ApiError::NotFound("Sites directory not found".into()),
            _ => {
                tracing::error!(error = %err, "Failed to read sites directory");
                ApiError::Internal("Failed to read sites directory".into())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<LogError> for ApiError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::NotFound | LogError::DirectoryNotFound => ApiError::NotFound(err.to_string()),
            LogError::InvalidName => ApiError::BadRequest(err.to_string()),
            LogError::Io(e) => {
                tracing::error!(error = %e, "Failed to read log");
                ApiError::Internal("Failed to read log file".into())
            }
        }
    }
}

impl From<ProbeError> for ApiError {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::Client(e) => {
                tracing::error!(error = %e, "Probe client unavailable");
                ApiError::Internal("Probe client unavailable".into())
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        tracing::error!(error = %err, "Blocking task failed");
        ApiError::Internal("Internal error".into())
    }
}
