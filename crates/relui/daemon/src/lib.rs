//! relui daemon library
//!
//! This module provides the core components for the relui daemon:
//! - HTML pages and form handlers for creating runs and starting tasks
//! - Static file serving
//! - Storage backends for workflow runs
//! - Dispatch topics that carry task start requests to workers
//! - Server lifecycle management

pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod server;
pub mod service;
pub mod storage;
pub mod views;

pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError, StorageError};
pub use server::Server;
pub use service::{WorkflowError, WorkflowService};
pub use storage::{FileStore, InMemoryStore, WorkflowStore};
