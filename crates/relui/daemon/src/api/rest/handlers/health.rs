//! Health and status handlers

use crate::api::rest::state::AppState;
use crate::dispatch::Topic;
use crate::error::ApiResult;
use crate::storage::WorkflowStore;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub workflows: usize,
    pub templates: usize,
    pub topic: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthCheckResponse>> {
    let workflows = state.store().workflows().await?;

    Ok(Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
        workflows: workflows.len(),
        templates: state.service.templates().len(),
        topic: state.service.topic().name().to_string(),
    }))
}
