//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use chat_types::{Result, message::ChatTurn};

// ─── LLM Port ────────────────────────────────────────────────

/// Request to send to a chat completion endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Prior history followed by the new user turn
    pub messages: Vec<ChatTurn>,
}

#[async_trait(?Send)]
pub trait LlmPort {
    /// Issue exactly one completion request and return the reply text
    async fn chat_completion(&self, req: ChatRequest) -> Result<String>;
}

// ─── Storage Port ────────────────────────────────────────────

/// Durable text key/value store.
///
/// Synchronous: a store mutation is not complete until its write has
/// been attempted.
pub trait StoragePort {
    /// Get a value by key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value, overwriting any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
