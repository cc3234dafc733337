//! In-memory storage implementation

use super::traits::*;
use crate::error::StorageError;
use async_trait::async_trait;
use relui_types::{BuildableTask, TaskId, WorkflowId, WorkflowRun};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage for development and testing
#[derive(Debug, Default)]
pub struct InMemoryStore {
    workflows: Arc<RwLock<HashMap<WorkflowId, WorkflowRun>>>,
}

impl InMemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkflowStore for InMemoryStore {
    async fn workflows(&self) -> StorageResult<Vec<WorkflowRun>> {
        let workflows = self.workflows.read().await;
        Ok(workflows.values().cloned().collect())
    }

    async fn workflow(&self, id: &WorkflowId) -> StorageResult<Option<WorkflowRun>> {
        let workflows = self.workflows.read().await;
        Ok(workflows.get(id).cloned())
    }

    async fn buildable_task(
        &self,
        workflow_id: &WorkflowId,
        task_id: &TaskId,
    ) -> StorageResult<Option<BuildableTask>> {
        let workflows = self.workflows.read().await;
        Ok(workflows
            .get(workflow_id)
            .and_then(|run| run.task(task_id))
            .cloned())
    }

    async fn add_workflow(&self, run: WorkflowRun) -> StorageResult<()> {
        let mut workflows = self.workflows.write().await;
        if workflows.contains_key(&run.id) {
            return Err(StorageError::Conflict(format!("workflow {} already exists", run.id)));
        }
        workflows.insert(run.id.clone(), run);
        Ok(())
    }
}
