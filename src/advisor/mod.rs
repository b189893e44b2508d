//! Scripted advisor: keyword rules and the chat transcript.

pub mod chat;
pub mod rules;

pub use chat::{ChatMessage, Conversation, Sender, WELCOME_SUGGESTIONS};
pub use rules::{AdvisorAction, AdvisorContext, AdvisorReply, KeywordRule, RulesEngine};
