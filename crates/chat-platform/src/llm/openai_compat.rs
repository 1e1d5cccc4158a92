//! OpenAI-compatible completion adapter.
//!
//! Works with OpenAI, DeepSeek, and any provider using the
//! OpenAI chat completions API format.
//! Uses browser `fetch()` via gloo-net, raced against a gloo-timers
//! timeout so a request that never resolves still ends the send cycle.

use serde::Deserialize;
use serde_json::{json, Value};

use chat_core::ports::ChatRequest;
use chat_types::{ChatError, Result};

/// `{ model, messages: [{role, content}, ...] }`
pub fn build_request_body(model: &str, req: &ChatRequest) -> Value {
    let messages: Vec<Value> = req
        .messages
        .iter()
        .map(|turn| {
            json!({
                "role": turn.role.as_str(),
                "content": turn.content,
            })
        })
        .collect();

    json!({
        "model": model,
        "messages": messages,
    })
}

/// Extract the first choice's text from a completion response body.
/// A blank reply counts as no reply.
pub fn parse_completion_body(body: &str) -> Result<String> {
    let data: ApiResponse = serde_json::from_str(body)
        .map_err(|e| ChatError::Completion(format!("Malformed response: {}", e)))?;

    data.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ChatError::Completion("Response contained no reply".to_string()))
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(target_arch = "wasm32")]
pub use provider::OpenAiCompatProvider;

#[cfg(target_arch = "wasm32")]
mod provider {
    use async_trait::async_trait;
    use futures::future::{self, Either};
    use gloo_net::http::Request;
    use gloo_timers::future::TimeoutFuture;

    use chat_core::ports::{ChatRequest, LlmPort};
    use chat_types::{ChatError, Result, config::LlmConfig};
    use super::{build_request_body, parse_completion_body};

    /// Provider that speaks the OpenAI chat completions protocol.
    pub struct OpenAiCompatProvider {
        config: LlmConfig,
    }

    impl OpenAiCompatProvider {
        pub fn new(config: LlmConfig) -> Self {
            Self { config }
        }

        async fn post(&self, req: &ChatRequest) -> Result<String> {
            let url = self.config.completions_url();
            let body = build_request_body(&self.config.model, req);

            let response = Request::post(&url)
                .header("Content-Type", "application/json")
                .header("Authorization", &format!("Bearer {}", self.config.api_key))
                .json(&body)
                .map_err(|e| ChatError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ChatError::Network(e.to_string()))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| ChatError::Network(e.to_string()))?;

            if !response.ok() {
                return Err(ChatError::Completion(format!(
                    "Failed to get response from {}: HTTP {} {}",
                    self.config.provider.label(),
                    status,
                    text.trim()
                )));
            }

            parse_completion_body(&text)
        }
    }

    #[async_trait(?Send)]
    impl LlmPort for OpenAiCompatProvider {
        async fn chat_completion(&self, req: ChatRequest) -> Result<String> {
            self.config.validate()?;

            let timeout_ms = self.config.request_timeout_ms;
            let millis = u32::try_from(timeout_ms).unwrap_or(u32::MAX);

            let request = self.post(&req);
            let timeout = TimeoutFuture::new(millis);
            futures::pin_mut!(request, timeout);

            match future::select(request, timeout).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => {
                    log::warn!("Completion request exceeded {}ms", timeout_ms);
                    Err(ChatError::Timeout(timeout_ms))
                }
            }
        }
    }
}
