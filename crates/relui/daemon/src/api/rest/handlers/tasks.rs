//! Task dispatch handlers

use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{extract::State, response::Redirect, Form};
use relui_types::{TaskId, WorkflowId};
use serde::Deserialize;

/// Start-task form
#[derive(Debug, Default, Deserialize)]
pub struct StartTaskForm {
    #[serde(rename = "workflow.id", default)]
    pub workflow_id: String,

    #[serde(rename = "task.id", default)]
    pub task_id: String,
}

/// Publish a start request for a task and redirect to the run list
///
/// Returns once the dispatch topic acknowledged the message. If the client
/// goes away first the wait is dropped, but the message may still be
/// delivered.
pub async fn start_task(
    State(state): State<AppState>,
    Form(form): Form<StartTaskForm>,
) -> ApiResult<Redirect> {
    let workflow_id = WorkflowId::new(form.workflow_id);
    let task_id = TaskId::new(form.task_id);

    state
        .service
        .start_task(&workflow_id, &task_id)
        .await
        .inspect_err(|e| {
            if e.is_client_error() {
                tracing::warn!(operation = "start_task", workflow_id = %workflow_id, task_id = %task_id, error = %e, "Rejected task start");
            } else {
                tracing::error!(operation = "start_task", workflow_id = %workflow_id, task_id = %task_id, error = %e, "Failed to start task");
            }
        })?;

    Ok(Redirect::to("/"))
}
