//! Task dispatch: publishing a start request and waiting for the bus

use super::{WorkflowError, WorkflowService};
use crate::dispatch::{Message, PublishError};
use relui_types::{DispatchRequest, TaskId, WorkflowId};

impl WorkflowService {
    /// Publish a start request for one task of a run
    ///
    /// Returns the bus message id once the publish is acknowledged. The wait
    /// is bounded by the configured timeout, and dropping the returned future
    /// (e.g. on client disconnect) abandons it. Delivery is at-least-once: a
    /// timeout does not mean the message was lost, and the task's state in
    /// the store is left to the workers.
    pub async fn start_task(
        &self,
        workflow_id: &WorkflowId,
        task_id: &TaskId,
    ) -> Result<String, WorkflowError> {
        let not_found = || WorkflowError::NotFound {
            workflow_id: workflow_id.clone(),
            task_id: task_id.clone(),
        };

        let run = self.store.workflow(workflow_id).await?.ok_or_else(not_found)?;
        let task = self
            .store
            .buildable_task(workflow_id, task_id)
            .await?
            .ok_or_else(not_found)?;

        let request = DispatchRequest::new(&run.id, &task);
        let message = Message::from_request(&request)?;

        let pending = self.topic.publish(message);
        let message_id = tokio::time::timeout(self.ack_timeout, pending.get())
            .await
            .map_err(|_| PublishError::Timeout(self.ack_timeout))??;

        tracing::info!(
            workflow_id = %run.id,
            task_id = %task.id,
            task_type = %task.task_type,
            topic = %self.topic.name(),
            message_id = %message_id,
            "Dispatched task"
        );
        Ok(message_id)
    }
}
