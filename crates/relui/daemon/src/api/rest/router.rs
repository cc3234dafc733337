//! API Router configuration

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/workflows", get(handlers::list_workflows))
        .route("/workflows/:id", get(handlers::get_workflow));

    Router::new()
        // Pages; `/` is answered by the static fallback
        .route("/workflows/new", get(handlers::new_workflow))
        // Form actions
        .route("/workflows/create", post(handlers::create_workflow))
        .route("/tasks/start", post(handlers::start_task))
        // Health and JSON API
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes)
        // The home page, then static files
        .fallback(handlers::serve_static)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
