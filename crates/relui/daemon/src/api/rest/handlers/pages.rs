//! HTML page handlers

use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use crate::storage::WorkflowStore;
use axum::{extract::State, response::Html};

/// Render the list of runs
pub async fn home(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let workflows = state
        .store()
        .workflows()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "home: failed to list workflows"))?;

    let page = state
        .views
        .home(workflows)
        .inspect_err(|e| tracing::error!(error = %e, "home: failed to render page"))?;
    Ok(Html(page))
}

/// Render the run-creation form
pub async fn new_workflow(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let page = state
        .views
        .new_workflow(state.service.templates())
        .inspect_err(|e| tracing::error!(error = %e, "new_workflow: failed to render page"))?;
    Ok(Html(page))
}
