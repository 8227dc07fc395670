use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::CompletionProvider;
use crate::config::LlmConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    r#type: Option<String>,
    code: Option<String>,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

/// A completed chat request with the metadata the `check` command reports.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub content: Option<String>,
    pub model: Option<String>,
    pub usage: Option<TokenUsage>,
}

/// Error carrying the HTTP status of a rejected API call.
#[derive(Debug, thiserror::Error)]
#[error("Groq API error ({status}): {message}")]
pub struct ApiStatusError {
    pub status: u16,
    pub message: String,
}

/// Client for Groq's OpenAI-compatible chat completions endpoint.
pub struct GroqProvider {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GroqProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("GROQ_API_KEY must be set to use the Groq provider")?;

        let endpoint = format!("{}/chat/completions", config.api_base);

        info!(
            "Initialized Groq provider with endpoint: {} (model: {})",
            endpoint, config.model
        );

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single-message chat request with an explicit output ceiling.
    pub async fn chat(&self, prompt: &str, max_tokens: u32) -> Result<ChatCompletion> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens,
        };

        debug!(
            "Sending chat request to Groq API ({} prompt chars, max_tokens {})",
            prompt.len(),
            max_tokens
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Groq API")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            error!(
                "Groq API request failed with status {}: {}",
                status, response_text
            );

            let message = match serde_json::from_str::<ErrorResponse>(&response_text) {
                Ok(error_response) => format!(
                    "{} (type: {:?}, code: {:?})",
                    error_response.error.message,
                    error_response.error.r#type,
                    error_response.error.code
                ),
                Err(_) => response_text,
            };

            return Err(ApiStatusError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let parsed: ChatResponse =
            serde_json::from_str(&response_text).context("Failed to parse Groq API response")?;

        Ok(ChatCompletion {
            content: parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content),
            model: parsed.model,
            usage: parsed.usage,
        })
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "Groq"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let completion = self.chat(prompt, self.max_tokens).await?;

        let text = completion
            .content
            .ok_or_else(|| anyhow!("Groq API returned no completion content"))?;

        info!("Completion received: {} chars", text.len());
        Ok(text)
    }
}
