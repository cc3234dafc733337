//! Error types for relui-daemon

use crate::service::WorkflowError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relui_types::TemplateError;
use serde::Serialize;
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Workflow templates could not be loaded
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// A record with the same id already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Stored data could not be decoded
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Backing medium failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Workflow operation failed
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Page rendering failed
    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Workflow(err) => match err {
                WorkflowError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                WorkflowError::UnknownTemplate(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_TEMPLATE"),
                WorkflowError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                WorkflowError::NoTemplatesConfigured => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "NO_TEMPLATES_CONFIGURED")
                }
                WorkflowError::IdCollision(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ID_COLLISION"),
                WorkflowError::Persistence(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
                WorkflowError::Dispatch(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DISPATCH_ERROR"),
            },
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ApiError::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, "RENDER_ERROR"),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Server faults are logged where they happen; the caller only sees the
        // canonical status text.
        let error = if status.is_server_error() {
            status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        } else {
            match &self {
                ApiError::Workflow(err) => err.to_string(),
                other => other.to_string(),
            }
        };

        let body = ErrorResponse {
            error,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::PublishError;
    use relui_types::{TaskId, WorkflowId};

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("disk full".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_workflow_error_status_codes() {
        let status = |err: WorkflowError| ApiError::from(err).into_response().status();

        assert_eq!(
            status(WorkflowError::Validation("workflow revision is required".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(WorkflowError::NoTemplatesConfigured),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(WorkflowError::NotFound {
                workflow_id: WorkflowId::new("wf"),
                task_id: TaskId::new("t"),
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(WorkflowError::Persistence(StorageError::Conflict("wf".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(WorkflowError::Dispatch(PublishError::Closed)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
