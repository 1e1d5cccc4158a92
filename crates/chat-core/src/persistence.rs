//! Persistence adapter — the conversation collection and settings as JSON
//! text under namespaced keys of a [`StoragePort`].
//!
//! Loading never fails: absent or unreadable data yields the empty
//! collection (or default settings) so a corrupted store cannot keep the
//! client from starting.

use std::collections::HashSet;
use std::rc::Rc;

use chat_types::{
    Result,
    config::{ChatConfig, DEFAULT_NAMESPACE},
    conversation::Conversation,
};
use crate::ports::StoragePort;

const CONVERSATIONS_KEY: &str = "conversations";
const CONFIG_KEY: &str = "config";

#[derive(Clone)]
pub struct Persistence {
    storage: Rc<dyn StoragePort>,
    namespace: String,
}

impl Persistence {
    pub fn new(storage: Rc<dyn StoragePort>, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let namespace = if namespace.trim().is_empty() {
            DEFAULT_NAMESPACE.to_string()
        } else {
            namespace
        };
        Self { storage, namespace }
    }

    pub fn conversations_key(&self) -> String {
        format!("{}:{}", self.namespace, CONVERSATIONS_KEY)
    }

    pub fn config_key(&self) -> String {
        format!("{}:{}", self.namespace, CONFIG_KEY)
    }

    pub fn backend_name(&self) -> &str {
        self.storage.backend_name()
    }

    /// Load the stored collection, or an empty one when nothing usable is stored.
    pub fn load(&self) -> Vec<Conversation> {
        let key = self.conversations_key();
        let text = match self.storage.get(&key) {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Could not read {} ({}), starting empty", key, e);
                return Vec::new();
            }
        };

        match decode_conversations(&text) {
            Ok(conversations) => conversations,
            Err(e) => {
                log::warn!("Stored conversations are malformed ({}), starting empty", e);
                Vec::new()
            }
        }
    }

    /// Serialize the full collection and overwrite the stored copy.
    pub fn save(&self, conversations: &[Conversation]) -> Result<()> {
        let text = serde_json::to_string(conversations)?;
        self.storage.set(&self.conversations_key(), &text)
    }

    pub fn load_config(&self) -> ChatConfig {
        let key = self.config_key();
        match self.storage.get(&key) {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("Stored settings are malformed ({}), using defaults", e);
                ChatConfig::default()
            }),
            Ok(None) => ChatConfig::default(),
            Err(e) => {
                log::warn!("Could not read {} ({}), using defaults", key, e);
                ChatConfig::default()
            }
        }
    }

    pub fn save_config(&self, config: &ChatConfig) -> Result<()> {
        let text = serde_json::to_string(config)?;
        self.storage.set(&self.config_key(), &text)
    }
}

/// Parse a stored collection. Records repeating an earlier id are dropped
/// so ids stay unique after load.
pub fn decode_conversations(text: &str) -> Result<Vec<Conversation>> {
    let parsed: Vec<Conversation> = serde_json::from_str(text)?;

    let mut seen = HashSet::new();
    let mut conversations = Vec::with_capacity(parsed.len());
    for conv in parsed {
        if seen.insert(conv.id.clone()) {
            conversations.push(conv);
        } else {
            log::warn!("Dropping stored conversation with duplicate id {}", conv.id);
        }
    }
    Ok(conversations)
}
