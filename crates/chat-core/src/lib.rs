//! Conversation state management core.
//!
//! Owns the conversation collection, keeps it persisted through a
//! [`ports::StoragePort`], and drives send cycles against an
//! [`ports::LlmPort`]. Nothing here touches platform APIs.

pub mod ports;
pub mod event_bus;
pub mod persistence;
pub mod store;
pub mod completion;
pub mod orchestrator;
