//! Completion client — turns a history snapshot plus a new utterance into
//! one request against an [`LlmPort`].

use chat_types::{ChatError, Result, message::ChatTurn};
use crate::ports::{ChatRequest, LlmPort};

/// History followed by the utterance as a trailing user turn
pub fn build_request(history: Vec<ChatTurn>, utterance: &str) -> ChatRequest {
    let mut messages = history;
    messages.push(ChatTurn::user(utterance));
    ChatRequest { messages }
}

/// Issue a single completion request. No retry, no partial result.
/// A reply that is blank after trimming is a failure.
pub async fn request_completion(
    llm: &dyn LlmPort,
    history: Vec<ChatTurn>,
    utterance: &str,
) -> Result<String> {
    let reply = llm.chat_completion(build_request(history, utterance)).await?;
    if reply.trim().is_empty() {
        return Err(ChatError::Completion("Response contained no reply".to_string()));
    }
    Ok(reply)
}
