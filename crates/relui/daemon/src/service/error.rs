//! Workflow operation errors

use crate::dispatch::PublishError;
use crate::error::StorageError;
use relui_types::{TaskId, WorkflowId};
use thiserror::Error;

/// Failures of run creation and task dispatch
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Caller input is missing or malformed
    #[error("{0}")]
    Validation(String),

    /// No template is configured to instantiate
    #[error("Unable to create workflow: no workflows configured")]
    NoTemplatesConfigured,

    /// The caller named a template that is not configured
    #[error("unknown workflow template '{0}'")]
    UnknownTemplate(String),

    /// The run or the task does not exist
    #[error("task {task_id} of workflow {workflow_id} not found")]
    NotFound {
        workflow_id: WorkflowId,
        task_id: TaskId,
    },

    /// Id generation produced a value already used by the run
    #[error("generated id {0} collides with an id already assigned")]
    IdCollision(String),

    /// The store failed
    #[error("persistence error: {0}")]
    Persistence(#[from] StorageError),

    /// Publishing failed or was not acknowledged
    #[error("dispatch error: {0}")]
    Dispatch(#[from] PublishError),
}

impl WorkflowError {
    /// Whether the failure was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            WorkflowError::Validation(_)
                | WorkflowError::UnknownTemplate(_)
                | WorkflowError::NotFound { .. }
        )
    }
}
