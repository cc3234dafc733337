//! Dispatch requests: the message a worker consumes to start one task
//!
//! Delivery is at-least-once. Consumers must treat a repeated
//! `(workflow_id, buildable_task_id)` pair as the same request.

use crate::{BuildableTask, TaskId, WorkflowId};
use serde::{Deserialize, Serialize};

/// Request for a worker to start a buildable task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub workflow_id: WorkflowId,
    pub buildable_task_id: TaskId,
    pub buildable_task_type: String,
}

impl DispatchRequest {
    pub fn new(workflow_id: &WorkflowId, task: &BuildableTask) -> Self {
        Self {
            workflow_id: workflow_id.clone(),
            buildable_task_id: task.id.clone(),
            buildable_task_type: task.task_type.clone(),
        }
    }
}
