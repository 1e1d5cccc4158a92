use serde::{Deserialize, Serialize};
use crate::{ChatError, Result};

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub llm: LlmConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    /// Bearer credential. Supplied by the user through settings, never built in.
    pub api_key: String,
    pub api_base: Option<String>,
    /// Upper bound for a single completion request
    pub request_timeout_ms: u64,
}

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAI,
            model: "gpt-4".to_string(),
            api_key: String::new(),
            api_base: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl LlmConfig {
    /// Base URL without a trailing slash: the explicit override when set,
    /// else the provider default.
    pub fn base_url(&self) -> String {
        let base = match self.api_base.as_deref().map(str::trim) {
            Some(b) if !b.is_empty() => b,
            _ => self.provider.default_base_url(),
        };
        base.trim_end_matches('/').to_string()
    }

    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url())
    }

    /// Check the settings needed before a request can be issued.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ChatError::Config(
                "API key is not set; add one in Settings".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ChatError::Config("Model name is empty".to_string()));
        }
        if self.base_url().is_empty() {
            return Err(ChatError::Config(
                "Custom provider requires an API base URL".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(ChatError::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// OpenAI-compatible chat completion providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProvider {
    OpenAI,
    DeepSeek,
    Custom,
}

impl LlmProvider {
    pub fn default_base_url(&self) -> &str {
        match self {
            LlmProvider::OpenAI => "https://api.openai.com",
            LlmProvider::DeepSeek => "https://api.deepseek.com",
            LlmProvider::Custom => "",
        }
    }

    pub fn all() -> &'static [LlmProvider] {
        &[LlmProvider::OpenAI, LlmProvider::DeepSeek, LlmProvider::Custom]
    }

    pub fn label(&self) -> &str {
        match self {
            LlmProvider::OpenAI => "OpenAI",
            LlmProvider::DeepSeek => "DeepSeek",
            LlmProvider::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
    /// Prefix for every key this client writes
    pub namespace: String,
}

pub const DEFAULT_NAMESPACE: &str = "chat";

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Auto,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackendType {
    /// Durable storage when available, memory otherwise
    Auto,
    Memory,
    LocalStorage,
}
