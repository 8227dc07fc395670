//! Transcript summarization.
//!
//! Combines an instruction with the transcript into a single prompt and asks
//! the configured [`CompletionProvider`] for a summary. No retries.

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

pub mod providers;

pub use providers::{CompletionProvider, GroqProvider};

/// Instruction used when the caller does not supply one.
pub const DEFAULT_INSTRUCTION: &str = "Summarize the following meeting transcript in a clear and organized manner, highlighting key points, decisions made, and action items:";

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Transcript is required")]
    MissingTranscript,
    #[error("No summary generated")]
    EmptyCompletion,
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

/// Build the prompt sent to the provider. A blank instruction falls back to
/// [`DEFAULT_INSTRUCTION`].
pub fn build_prompt(instruction: Option<&str>, transcript: &str) -> String {
    let instruction = instruction
        .filter(|i| !i.trim().is_empty())
        .unwrap_or(DEFAULT_INSTRUCTION);

    format!("{}\n\nTranscript:\n{}", instruction, transcript)
}

pub struct Summarizer {
    provider: Arc<dyn CompletionProvider>,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Summarize `transcript`, optionally steered by `instruction`.
    ///
    /// Validation happens before the provider is contacted; the completion
    /// text is returned verbatim.
    pub async fn summarize(
        &self,
        transcript: Option<&str>,
        instruction: Option<&str>,
    ) -> Result<String, SummarizeError> {
        let transcript = transcript
            .filter(|t| !t.trim().is_empty())
            .ok_or(SummarizeError::MissingTranscript)?;

        let prompt = build_prompt(instruction, transcript);

        info!(
            "Summarizing transcript ({} chars) with {}",
            transcript.len(),
            self.provider.name()
        );

        let summary = self.provider.complete(&prompt).await.map_err(|e| {
            error!("Error generating summary: {:#}", e);
            SummarizeError::Provider(e)
        })?;

        if summary.trim().is_empty() {
            error!("Error generating summary: provider returned empty content");
            return Err(SummarizeError::EmptyCompletion);
        }

        Ok(summary)
    }
}
