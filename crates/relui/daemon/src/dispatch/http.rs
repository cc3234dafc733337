//! HTTP push topic
//!
//! Each message is POSTed to a worker endpoint. A 2xx response is the
//! acknowledgment; the endpoint may return `{"message_id": "..."}` to name
//! the delivery, otherwise a local id is assigned.

use super::topic::{Message, PublishError, PublishResult, Topic};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use uuid::Uuid;

/// Header carrying the topic name
pub const TOPIC_HEADER: &str = "x-relui-topic";

#[derive(Debug, Deserialize)]
struct PushAck {
    message_id: Option<String>,
}

/// Topic that pushes messages to a single HTTP endpoint
pub struct HttpTopic {
    name: String,
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTopic {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Result<Self, PublishError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| PublishError::Transport(e.to_string()))?;
        Ok(Self::with_client(name, endpoint, client))
    }

    pub fn with_client(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Topic for HttpTopic {
    fn name(&self) -> &str {
        &self.name
    }

    fn publish(&self, message: Message) -> PublishResult {
        let (tx, result) = PublishResult::pending();
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let topic = self.name.clone();

        // The push runs to completion even if the caller stops waiting.
        tokio::spawn(async move {
            let outcome = push(&client, &endpoint, &topic, message).await;
            if let Err(e) = &outcome {
                tracing::warn!(topic = %topic, endpoint = %endpoint, error = %e, "Push delivery failed");
            }
            let _ = tx.send(outcome);
        });

        result
    }
}

async fn push(
    client: &reqwest::Client,
    endpoint: &str,
    topic: &str,
    message: Message,
) -> Result<String, PublishError> {
    let mut request = client
        .post(endpoint)
        .header(CONTENT_TYPE, "application/json")
        .header(TOPIC_HEADER, topic);
    for (key, value) in &message.attributes {
        request = request.header(format!("x-relui-{}", key.replace('_', "-")), value.as_str());
    }

    let response = request
        .body(message.data)
        .send()
        .await
        .map_err(|e| PublishError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PublishError::Rejected(status.as_u16()));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| PublishError::Transport(e.to_string()))?;
    let message_id = serde_json::from_slice::<PushAck>(&body)
        .ok()
        .and_then(|ack| ack.message_id)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Ok(message_id)
}
