pub mod openai_compat;

pub use openai_compat::{build_request_body, parse_completion_body};

#[cfg(target_arch = "wasm32")]
pub use openai_compat::OpenAiCompatProvider;
