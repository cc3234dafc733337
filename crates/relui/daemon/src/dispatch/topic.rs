//! Topic trait and message types

use relui_types::DispatchRequest;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;

/// Errors surfaced while publishing or waiting for an acknowledgment
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("message rejected by subscriber endpoint with status {0}")]
    Rejected(u16),

    #[error("no acknowledgment within {0:?}")]
    Timeout(Duration),

    #[error("publisher closed before acknowledging")]
    Closed,
}

/// A message as carried by the bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Encoded payload
    pub data: Vec<u8>,
    /// Transport-visible attributes
    pub attributes: BTreeMap<String, String>,
}

impl Message {
    /// Encode a dispatch request as JSON, exposing its ids as attributes
    pub fn from_request(request: &DispatchRequest) -> Result<Self, PublishError> {
        let data = serde_json::to_vec(request)?;
        let attributes = BTreeMap::from([
            ("workflow_id".to_string(), request.workflow_id.to_string()),
            ("task_id".to_string(), request.buildable_task_id.to_string()),
        ]);
        Ok(Self { data, attributes })
    }

    /// Decode the payload back into a dispatch request
    pub fn decode(&self) -> Result<DispatchRequest, PublishError> {
        Ok(serde_json::from_slice(&self.data)?)
    }
}

/// Pending acknowledgment for one published message
///
/// Dropping it stops waiting but does not recall the message: the transport
/// may still deliver it.
#[derive(Debug)]
pub struct PublishResult {
    rx: oneshot::Receiver<Result<String, PublishError>>,
}

impl PublishResult {
    /// A result the transport completes later through the returned sender
    pub fn pending() -> (oneshot::Sender<Result<String, PublishError>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// A result that is already settled
    pub fn ready(outcome: Result<String, PublishError>) -> Self {
        let (tx, result) = Self::pending();
        let _ = tx.send(outcome);
        result
    }

    /// Wait for the acknowledgment; yields the server-assigned message id
    pub async fn get(self) -> Result<String, PublishError> {
        self.rx.await.map_err(|_| PublishError::Closed)?
    }
}

/// A named destination for dispatch messages
pub trait Topic: Send + Sync {
    /// Topic name
    fn name(&self) -> &str;

    /// Start publishing `message`
    fn publish(&self, message: Message) -> PublishResult;
}
