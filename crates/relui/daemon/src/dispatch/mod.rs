//! Dispatch publisher gateway
//!
//! A [`Topic`] accepts a [`Message`] and hands back a [`PublishResult`] that
//! resolves once the transport acknowledges the message. Publishing itself
//! never blocks; callers decide how long to wait for the acknowledgment.

mod http;
mod memory;
mod topic;

pub use http::HttpTopic;
pub use memory::{InMemoryTopic, PublishedMessage};
pub use topic::{Message, PublishError, PublishResult, Topic};
