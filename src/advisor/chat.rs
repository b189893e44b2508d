//! Advisor conversation transcript.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::rules::{AdvisorAction, AdvisorContext, AdvisorReply, RulesEngine};

/// Suggestions offered with the opening greeting.
pub const WELCOME_SUGGESTIONS: [&str; 4] = [
    "Should I invest more now?",
    "What's the best fund for me?",
    "How to diversify my portfolio?",
    "Market outlook for Egypt",
];

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Advisor,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    pub action: AdvisorAction,
}

impl ChatMessage {
    fn user(content: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: Sender::User,
            content: content.to_string(),
            timestamp: Utc::now(),
            suggestions: Vec::new(),
            action: AdvisorAction::None,
        }
    }

    fn advisor(reply: AdvisorReply) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: Sender::Advisor,
            content: reply.content,
            timestamp: Utc::now(),
            suggestions: reply.suggestions,
            action: reply.action,
        }
    }
}

/// Running chat with the advisor. Opened lazily with a welcome greeting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the welcome greeting if the conversation is empty.
    pub fn open(&mut self, user_name: Option<&str>) -> &ChatMessage {
        if self.messages.is_empty() {
            let name = user_name.filter(|n| !n.trim().is_empty()).unwrap_or("there");
            self.messages.push(ChatMessage::advisor(AdvisorReply {
                rule: "welcome".to_string(),
                content: format!(
                    "Hello {name}! 👋 I'm your AI investment advisor. I can help you make smarter \
investment decisions based on your risk profile and market conditions. What would you like to know?"
                ),
                suggestions: WELCOME_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
                action: AdvisorAction::None,
            }));
        }
        &self.messages[0]
    }

    /// Record the user's message and the advisor's reply.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn ask(
        &mut self,
        engine: &RulesEngine,
        ctx: &AdvisorContext,
        text: &str,
    ) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.open(ctx.user_name.as_deref());
        let reply = engine.respond(ctx, text);
        self.messages.push(ChatMessage::user(text));
        self.messages.push(ChatMessage::advisor(reply));
        self.messages.last()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
