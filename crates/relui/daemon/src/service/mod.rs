//! Workflow instantiation and task dispatch
//!
//! [`WorkflowService`] holds the read-only templates together with handles
//! to the store and the dispatch topic. It keeps no other state, so one
//! instance is shared by every request without locking.

mod error;
mod ids;
mod instantiate;
mod trigger;

pub use error::WorkflowError;
pub use ids::{IdGenerator, UuidGenerator};
pub use instantiate::TemplateSelector;

use crate::dispatch::Topic;
use crate::storage::WorkflowStore;
use relui_types::WorkflowTemplate;
use std::sync::Arc;
use std::time::Duration;

/// Creates runs from templates and dispatches their tasks
pub struct WorkflowService {
    templates: Arc<[WorkflowTemplate]>,
    store: Arc<dyn WorkflowStore>,
    topic: Arc<dyn Topic>,
    ids: Arc<dyn IdGenerator>,
    ack_timeout: Duration,
}

impl WorkflowService {
    pub fn new(
        templates: Vec<WorkflowTemplate>,
        store: Arc<dyn WorkflowStore>,
        topic: Arc<dyn Topic>,
        ack_timeout: Duration,
    ) -> Self {
        Self {
            templates: templates.into(),
            store,
            topic,
            ids: Arc::new(UuidGenerator),
            ack_timeout,
        }
    }

    /// Replace the id generator
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Configured templates, in load order
    pub fn templates(&self) -> &[WorkflowTemplate] {
        &self.templates
    }

    pub fn store(&self) -> &Arc<dyn WorkflowStore> {
        &self.store
    }

    pub fn topic(&self) -> &Arc<dyn Topic> {
        &self.topic
    }
}

#[cfg(test)]
pub(crate) mod testing;
