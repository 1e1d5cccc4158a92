//! Platform adapters for the chat core.
//!
//! The pure request/response helpers and the in-memory backend build on
//! every target; the `fetch` and `localStorage` adapters only on wasm32.

pub mod llm;
pub mod storage;

#[cfg(test)]
mod tests;
