//! Channel trait and the message types that flow through it.

use std::pin::Pin;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ChannelError;

/// A line of user input received on a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: Uuid,
    /// Channel the message arrived on ("cli", "scripted").
    pub channel: String,
    pub user_id: String,
    pub content: String,
    pub received_at: DateTime<Utc>,
    /// Channel-specific extras.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl IncomingMessage {
    pub fn new(
        channel: impl Into<String>,
        user_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: channel.into(),
            user_id: user_id.into(),
            content: content.into(),
            received_at: Utc::now(),
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Text sent back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingResponse {
    pub content: String,
}

impl OutgoingResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Transient progress shown while a reply is being prepared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    /// The advisor is composing a reply.
    Thinking(String),
}

pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingMessage> + Send>>;

/// Message I/O for the app. Channels do no business logic.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Channel name (e.g. "cli").
    fn name(&self) -> &str;

    /// Begin reading input. The stream ends when the input source closes.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Deliver a response to the message that prompted it.
    async fn respond(
        &self,
        msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError>;

    /// Show a transient status. Channels may ignore it.
    async fn send_status(
        &self,
        _status: StatusUpdate,
        _metadata: &serde_json::Value,
    ) -> Result<(), ChannelError> {
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), ChannelError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming_message_defaults() {
        let msg = IncomingMessage::new("cli", "local-user", "start");
        assert_eq!(msg.channel, "cli");
        assert!(msg.metadata.is_null());
    }

    #[test]
    fn metadata_is_attached() {
        let msg = IncomingMessage::new("scripted", "tester", "next")
            .with_metadata(serde_json::json!({"line": 3}));
        assert_eq!(msg.metadata.get("line").and_then(|v| v.as_u64()), Some(3));
    }
}
