//! Application state for API handlers

use crate::service::WorkflowService;
use crate::storage::WorkflowStore;
use crate::views::Views;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Run creation and task dispatch
    pub service: Arc<WorkflowService>,

    /// Rendered pages
    pub views: Arc<Views>,

    /// Directory static files are served from
    pub static_root: Arc<PathBuf>,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(service: Arc<WorkflowService>, views: Arc<Views>, static_root: PathBuf) -> Self {
        Self {
            service,
            views,
            static_root: Arc::new(static_root),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Run store shared with the service
    pub fn store(&self) -> &Arc<dyn WorkflowStore> {
        self.service.store()
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        let duration = chrono::Utc::now() - self.started_at;
        let secs = duration.num_seconds();

        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else if secs < 86400 {
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        } else {
            format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
        }
    }
}
