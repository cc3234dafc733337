//! In-process topic
//!
//! Acknowledges every message immediately, keeps a log of what was
//! published and fans messages out to in-process subscribers.

use super::topic::{Message, PublishResult, Topic};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use uuid::Uuid;

/// A message accepted by an [`InMemoryTopic`]
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub id: String,
    pub message: Message,
    pub published_at: DateTime<Utc>,
}

/// Topic for development and tests
pub struct InMemoryTopic {
    name: String,
    log: Mutex<Vec<PublishedMessage>>,
    sender: broadcast::Sender<PublishedMessage>,
}

impl InMemoryTopic {
    /// Create a new in-memory topic
    pub fn new(name: impl Into<String>) -> Self {
        let (sender, _) = broadcast::channel(1000);
        Self {
            name: name.into(),
            log: Mutex::new(Vec::new()),
            sender,
        }
    }

    /// Subscribe to messages published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedMessage> {
        self.sender.subscribe()
    }

    /// Every message published so far, oldest first
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.log.lock().clone()
    }
}

impl Topic for InMemoryTopic {
    fn name(&self) -> &str {
        &self.name
    }

    fn publish(&self, message: Message) -> PublishResult {
        let published = PublishedMessage {
            id: Uuid::new_v4().to_string(),
            message,
            published_at: Utc::now(),
        };
        let id = published.id.clone();

        self.log.lock().push(published.clone());

        // Broadcast (ignore errors if no receivers)
        let _ = self.sender.send(published);

        tracing::debug!(topic = %self.name, message_id = %id, "Published message");
        PublishResult::ready(Ok(id))
    }
}
