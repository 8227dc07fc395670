//! `recap check`: verify the completion provider before serving.
//!
//! Sends a short test prompt, reports the model and token usage, then
//! summarizes a built-in stand-up transcript.

use crate::cli::CheckCliArgs;
use crate::config::Config;
use crate::global::API_KEY_PLACEHOLDER;
use crate::summarizer::build_prompt;
use crate::summarizer::providers::{ApiStatusError, GroqProvider, TokenUsage};
use anyhow::{anyhow, bail, Result};
use std::time::Instant;

const CONNECTIVITY_PROMPT: &str =
    "Explain the importance of fast language models in one paragraph.";
const CONNECTIVITY_MAX_TOKENS: u32 = 200;

const SAMPLE_INSTRUCTION: &str = "Summarize the following meeting transcript in bullet points, highlighting key accomplishments and action items:";
const SAMPLE_MAX_TOKENS: u32 = 500;
const SAMPLE_TRANSCRIPT: &str = "Meeting: Quick standup
John: Good morning team. Let's do our daily standup.
Sarah: I completed the user authentication feature yesterday. Today I'm working on the dashboard.
Mike: I fixed the bug in the payment system. Planning to start on the mobile app today.
John: Great work everyone. Any blockers?
Sarah: Need the API documentation from Mike.
Mike: I'll send that over after this meeting.
John: Perfect. Meeting adjourned.";

const PREVIEW_CHARS: usize = 100;

#[derive(Debug, PartialEq)]
enum KeyState {
    Missing,
    Placeholder,
    Present,
}

fn key_state(api_key: Option<&str>) -> KeyState {
    match api_key {
        None => KeyState::Missing,
        Some(API_KEY_PLACEHOLDER) => KeyState::Placeholder,
        Some(_) => KeyState::Present,
    }
}

pub async fn handle_check_command(args: CheckCliArgs) -> Result<()> {
    let config = Config::load()?;

    println!();
    println!("Provider Check");
    println!("==============");
    println!();

    if key_state(config.llm.api_key.as_deref()) != KeyState::Present {
        println!("GROQ_API_KEY is not set or still uses the placeholder value.");
        println!("To fix this:");
        println!("  1. Visit https://console.groq.com to get your API key");
        println!("  2. Put it in .env as GROQ_API_KEY=<your key> (run `recap init` to create the file)");
        println!("  3. Run `recap check` again");
        bail!("GROQ_API_KEY not configured");
    }

    let provider = GroqProvider::new(&config.llm)?;
    println!("Endpoint: {}", config.llm.api_base);
    println!("Model:    {}", provider.model());
    println!();
    print!("Making test request... ");

    let start = Instant::now();
    let completion = match provider.chat(CONNECTIVITY_PROMPT, CONNECTIVITY_MAX_TOKENS).await {
        Ok(completion) => completion,
        Err(e) => {
            println!("failed");
            println!("  {}", failure_hint(&e));
            return Err(e);
        }
    };
    println!("done ({:.2}s)", start.elapsed().as_secs_f64());

    let content = completion
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| anyhow!("No content in response"))?;

    println!();
    println!("Response preview: {}", preview(&content, PREVIEW_CHARS));
    println!(
        "Model used:       {}",
        completion.model.as_deref().unwrap_or("<not reported>")
    );
    println!("Usage:            {}", format_usage(completion.usage.as_ref()));

    if args.skip_summary {
        println!();
        println!("Provider is working correctly.");
        return Ok(());
    }

    println!();
    print!("Summarizing sample meeting... ");
    let prompt = build_prompt(Some(SAMPLE_INSTRUCTION), SAMPLE_TRANSCRIPT);
    let sample = match provider.chat(&prompt, SAMPLE_MAX_TOKENS).await {
        Ok(sample) => sample,
        Err(e) => {
            println!("failed");
            println!("  {}", failure_hint(&e));
            return Err(e);
        }
    };
    println!("done");

    let summary = sample
        .content
        .ok_or_else(|| anyhow!("Sample summarization returned no content"))?;

    println!();
    println!("Generated summary:");
    println!("{}", summary);
    println!();
    println!("Provider is working correctly.");

    Ok(())
}

/// Human hint for a failed provider call, keyed on the HTTP status.
fn failure_hint(err: &anyhow::Error) -> &'static str {
    match err.downcast_ref::<ApiStatusError>().map(|e| e.status) {
        Some(401) => "Authentication failed - check your API key",
        Some(429) => "Rate limit exceeded - try again later",
        Some(400) => "Bad request - check the model name and request format",
        _ => "Network or other error occurred",
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

fn format_usage(usage: Option<&TokenUsage>) -> String {
    let Some(usage) = usage else {
        return "<not reported>".to_string();
    };

    let show = |v: Option<u64>| v.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string());
    format!(
        "prompt {} / completion {} / total {} tokens",
        show(usage.prompt_tokens),
        show(usage.completion_tokens),
        show(usage.total_tokens)
    )
}
