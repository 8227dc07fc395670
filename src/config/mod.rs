use crate::global;
use anyhow::{Context, Result};
use serde::Serialize;
use std::str::FromStr;
use tracing::{info, warn};

/// Environment variable names read by [`Config::load`].
pub mod env_keys {
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    pub const MAX_UPLOAD_BYTES: &str = "MAX_UPLOAD_BYTES";
    pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
    pub const GROQ_API_BASE: &str = "GROQ_API_BASE";
    pub const GROQ_MODEL: &str = "GROQ_MODEL";
    pub const GROQ_TEMPERATURE: &str = "GROQ_TEMPERATURE";
    pub const GROQ_MAX_TOKENS: &str = "GROQ_MAX_TOKENS";
    pub const EMAIL_USER: &str = "EMAIL_USER";
    pub const EMAIL_PASSWORD: &str = "EMAIL_PASSWORD";
    pub const SMTP_HOST: &str = "SMTP_HOST";
    pub const SMTP_PORT: &str = "SMTP_PORT";
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Ceiling for uploaded transcript files and JSON request bodies.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LlmConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MailConfig {
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: global::DEFAULT_PORT,
            max_upload_bytes: global::DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.1,
            max_tokens: 2048,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
        }
    }
}

impl MailConfig {
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

impl Config {
    /// Load configuration from the process environment, seeding it from a
    /// `.env` file in the working directory when one exists.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {:?}", path),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Ignoring unreadable .env file: {}", e),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(host) = get(env_keys::HOST) {
            config.server.host = host;
        }
        if let Some(port) = parse_var(&get, env_keys::PORT)? {
            config.server.port = port;
        }
        if let Some(limit) = parse_var(&get, env_keys::MAX_UPLOAD_BYTES)? {
            config.server.max_upload_bytes = limit;
        }

        config.llm.api_key = get(env_keys::GROQ_API_KEY);
        if let Some(base) = get(env_keys::GROQ_API_BASE) {
            config.llm.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(model) = get(env_keys::GROQ_MODEL) {
            config.llm.model = model;
        }
        if let Some(temperature) = parse_var(&get, env_keys::GROQ_TEMPERATURE)? {
            config.llm.temperature = temperature;
        }
        if let Some(max_tokens) = parse_var(&get, env_keys::GROQ_MAX_TOKENS)? {
            config.llm.max_tokens = max_tokens;
        }

        config.mail.username = get(env_keys::EMAIL_USER);
        config.mail.password = get(env_keys::EMAIL_PASSWORD);
        if let Some(host) = get(env_keys::SMTP_HOST) {
            config.mail.smtp_host = host;
        }
        if let Some(port) = parse_var(&get, env_keys::SMTP_PORT)? {
            config.mail.smtp_port = port;
        }

        Ok(config)
    }
}

fn parse_var<T, G>(get: &G, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|raw| {
            raw.parse::<T>()
                .with_context(|| format!("Invalid value for {}: {:?}", key, raw))
        })
        .transpose()
}
