//! Language model access
//!
//! The research and drafting stages only need "prompt in, text out", so the
//! provider sits behind the `LanguageModel` trait.

mod gemini;

pub use gemini::GeminiModel;

use async_trait::async_trait;
use thiserror::Error;

/// Text returned by a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmReply {
    pub content: String,
}

impl LlmReply {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Failure to get a completion
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Request(String),
    #[error("LLM returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("LLM response could not be decoded: {0}")]
    Decode(String),
    #[error("LLM returned no content")]
    Empty,
}

/// A text-completion model
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model name, for logs
    fn name(&self) -> &str;

    /// Send one prompt and wait for the full reply
    async fn invoke(&self, prompt: &str) -> Result<LlmReply, LlmError>;
}
