use serde::{Deserialize, Serialize};
use crate::message::{ChatTurn, Message};

/// A titled, ordered transcript of messages.
///
/// `messages` is append-only; insertion order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            messages: Vec::new(),
        }
    }

    /// Title given to the conversation created when `existing` others exist
    pub fn default_title(existing: usize) -> String {
        format!("Conversation {}", existing + 1)
    }

    /// Role/content history of the whole transcript, in order
    pub fn history(&self) -> Vec<ChatTurn> {
        self.messages.iter().map(Message::to_turn).collect()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
