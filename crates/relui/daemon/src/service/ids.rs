//! Run and task id generation

use relui_types::{TaskId, WorkflowId};

/// Source of fresh run and task ids
///
/// Ids must be collision resistant without coordination between processes.
pub trait IdGenerator: Send + Sync {
    fn workflow_id(&self) -> WorkflowId;
    fn task_id(&self) -> TaskId;
}

/// Random UUIDv4 ids
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn workflow_id(&self) -> WorkflowId {
        WorkflowId::generate()
    }

    fn task_id(&self) -> TaskId {
        TaskId::generate()
    }
}
