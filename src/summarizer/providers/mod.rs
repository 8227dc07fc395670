use anyhow::Result;
use async_trait::async_trait;

pub mod groq;

pub use groq::{ApiStatusError, ChatCompletion, GroqProvider, TokenUsage};

/// A text-completion backend: one prompt in, generated text out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &str) -> Result<String>;
}
