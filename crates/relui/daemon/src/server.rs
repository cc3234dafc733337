//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::config::{resolve_relative, DaemonConfig, StorageConfig, TransportConfig};
use crate::dispatch::{HttpTopic, InMemoryTopic, Topic};
use crate::error::{DaemonError, DaemonResult};
use crate::service::WorkflowService;
use crate::storage::{FileStore, InMemoryStore, WorkflowStore};
use crate::views::Views;
use axum::Router;
use relui_types::{load_templates, WorkflowTemplate};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

/// relui daemon server
pub struct Server {
    config: DaemonConfig,
    state: AppState,
}

impl Server {
    /// Create a new server with the given configuration
    pub async fn new(config: DaemonConfig) -> DaemonResult<Self> {
        config
            .validate()
            .map_err(|e| DaemonError::Config(e.to_string()))?;
        let templates = load_configured_templates(&resolve_relative(&config.templates.dir))?;

        let store: Arc<dyn WorkflowStore> = match &config.storage {
            StorageConfig::Memory => Arc::new(InMemoryStore::new()),
            StorageConfig::File { path } => Arc::new(FileStore::open(path).await?),
        };

        let topic: Arc<dyn Topic> = match &config.dispatch.transport {
            TransportConfig::Memory => Arc::new(InMemoryTopic::new(&config.dispatch.topic)),
            TransportConfig::Http { endpoint } => {
                let topic = HttpTopic::new(&config.dispatch.topic, endpoint)
                    .map_err(|e| DaemonError::Config(format!("Invalid dispatch transport: {}", e)))?;
                tracing::info!(topic = %topic.name(), endpoint = %topic.endpoint(), "Dispatching over HTTP push");
                Arc::new(topic)
            }
        };

        let service = Arc::new(WorkflowService::new(
            templates,
            store,
            topic,
            config.dispatch.ack_timeout(),
        ));
        let views = Arc::new(
            Views::new().map_err(|e| DaemonError::Server(format!("Invalid page template: {}", e)))?,
        );
        let state = AppState::new(service, views, resolve_relative(&config.server.static_dir));

        Ok(Self { config, state })
    }

    /// Router serving this daemon's routes
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Run the server
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;
        let app = self.router();

        let listener = TcpListener::bind(addr).await?;

        tracing::info!("relui daemon listening on {}", addr);
        tracing::info!(
            templates = self.state.service.templates().len(),
            static_root = %self.state.static_root.display(),
            topic = %self.config.dispatch.topic,
            "Serving release workflows"
        );

        // Run server with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("relui daemon shutting down");
        Ok(())
    }
}

/// Load templates, treating a missing directory as an empty set
fn load_configured_templates(dir: &Path) -> DaemonResult<Vec<WorkflowTemplate>> {
    if !dir.exists() {
        tracing::warn!(dir = %dir.display(), "Template directory does not exist; no workflows configured");
        return Ok(Vec::new());
    }

    let templates = load_templates(dir)?;
    if templates.is_empty() {
        tracing::warn!(dir = %dir.display(), "No workflow templates found");
    }
    for template in &templates {
        tracing::info!(template = %template.name, tasks = template.tasks.len(), "Loaded workflow template");
    }
    Ok(templates)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
