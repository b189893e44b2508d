//! ScriptedChannel: replays a fixed list of input lines and captures the
//! responses. Used for demos and tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::channels::channel::{
    Channel, IncomingMessage, MessageStream, OutgoingResponse, StatusUpdate,
};
use crate::error::ChannelError;

pub struct ScriptedChannel {
    lines: Vec<String>,
    responses: Mutex<Vec<String>>,
    statuses: Mutex<Vec<StatusUpdate>>,
}

impl ScriptedChannel {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            responses: Mutex::new(Vec::new()),
            statuses: Mutex::new(Vec::new()),
        }
    }

    /// Responses sent so far, in order.
    pub fn responses(&self) -> Vec<String> {
        self.responses
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn statuses(&self) -> Vec<StatusUpdate> {
        self.statuses
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Channel for ScriptedChannel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let messages: Vec<IncomingMessage> = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                IncomingMessage::new("scripted", "script", line.as_str())
                    .with_metadata(serde_json::json!({ "line": i + 1 }))
            })
            .collect();

        // Yields every line, then closes
        Ok(Box::pin(futures::stream::iter(messages)))
    }

    async fn respond(
        &self,
        _msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError> {
        self.responses
            .lock()
            .map_err(|e| ChannelError::SendFailed {
                name: "scripted".into(),
                reason: e.to_string(),
            })?
            .push(response.content);
        Ok(())
    }

    async fn send_status(
        &self,
        status: StatusUpdate,
        _metadata: &serde_json::Value,
    ) -> Result<(), ChannelError> {
        if let Ok(mut statuses) = self.statuses.lock() {
            statuses.push(status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn replays_lines_in_order() {
        let channel = ScriptedChannel::new(["start", "next"]);
        let stream = channel.start().await.unwrap();
        let lines: Vec<_> = stream.map(|m| m.content).collect().await;
        assert_eq!(lines, vec!["start", "next"]);
    }

    #[tokio::test]
    async fn captures_responses() {
        let channel = ScriptedChannel::new(Vec::<String>::new());
        let msg = IncomingMessage::new("scripted", "script", "x");
        channel
            .respond(&msg, OutgoingResponse::text("hello"))
            .await
            .unwrap();
        assert_eq!(channel.responses(), vec!["hello"]);
    }
}
