//! Workflow run handlers

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use crate::service::TemplateSelector;
use crate::storage::WorkflowStore;
use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use relui_types::{WorkflowId, WorkflowRun};
use serde::Deserialize;

/// Run-creation form
#[derive(Debug, Default, Deserialize)]
pub struct CreateWorkflowForm {
    /// Revision the run builds
    #[serde(rename = "workflow.revision", default)]
    pub revision: String,

    /// Template to instantiate; the first configured one when absent
    #[serde(rename = "workflow.template", default)]
    pub template: Option<String>,
}

/// Instantiate a template and redirect to the run list
pub async fn create_workflow(
    State(state): State<AppState>,
    Form(form): Form<CreateWorkflowForm>,
) -> ApiResult<Redirect> {
    let selector = TemplateSelector::from_form(form.template.as_deref());

    state
        .service
        .create_run(&selector, &form.revision)
        .await
        .inspect_err(|e| {
            if e.is_client_error() {
                tracing::warn!(operation = "create_workflow", revision = %form.revision, error = %e, "Rejected workflow creation");
            } else {
                tracing::error!(operation = "create_workflow", revision = %form.revision, error = %e, "Failed to create workflow");
            }
        })?;

    Ok(Redirect::to("/"))
}

/// List all runs, newest first
pub async fn list_workflows(State(state): State<AppState>) -> ApiResult<Json<Vec<WorkflowRun>>> {
    let mut workflows = state.store().workflows().await?;
    workflows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(workflows))
}

/// Get a specific run
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<WorkflowRun>> {
    let workflow = state
        .store()
        .workflow(&WorkflowId::new(&id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Workflow {} not found", id)))?;

    Ok(Json(workflow))
}
