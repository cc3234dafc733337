//! Storage trait definitions

use crate::error::StorageError;
use async_trait::async_trait;
use relui_types::{BuildableTask, TaskId, WorkflowId, WorkflowRun};

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage for workflow runs
///
/// Implementations must be safe to share between concurrent requests and
/// must make `add_workflow` durable before returning `Ok`.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// List all runs
    async fn workflows(&self) -> StorageResult<Vec<WorkflowRun>>;

    /// Get a run by ID
    async fn workflow(&self, id: &WorkflowId) -> StorageResult<Option<WorkflowRun>>;

    /// Get a task of a specific run
    ///
    /// A task id that exists only under a different run is not found.
    async fn buildable_task(
        &self,
        workflow_id: &WorkflowId,
        task_id: &TaskId,
    ) -> StorageResult<Option<BuildableTask>>;

    /// Persist a new run; fails with `Conflict` if the id is taken
    async fn add_workflow(&self, run: WorkflowRun) -> StorageResult<()>;
}
