use crate::api::{ApiServer, AppState};
use crate::config::Config;
use crate::mailer::{Mailer, SmtpRelay};
use crate::summarizer::{GroqProvider, Summarizer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Command-line overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct ServeOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

pub async fn run_service(overrides: ServeOverrides) -> Result<()> {
    info!("Starting Recap service");

    let mut config = Config::load()?;
    if let Some(host) = overrides.host {
        config.server.host = host;
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }

    debug!(
        "Effective configuration: {}",
        serde_json::to_string(&config).unwrap_or_default()
    );

    let state = build_state(&config)?;
    let api_server = ApiServer::new(&config.server, state);

    info!("Recap is ready!");
    info!(
        "Health check: http://localhost:{}/api/health",
        config.server.port
    );

    api_server.start().await
}

/// Wire the production provider and relay into handler state.
pub fn build_state(config: &Config) -> Result<AppState> {
    let provider = GroqProvider::new(&config.llm).context("Failed to initialize completion provider")?;
    let summarizer = Summarizer::new(Arc::new(provider));

    if !config.mail.has_credentials() {
        warn!("EMAIL_USER/EMAIL_PASSWORD not set; /api/send-email will fail until they are configured");
    }
    let sender = config.mail.username.clone().unwrap_or_default();
    let mailer = Mailer::new(Arc::new(SmtpRelay::new(config.mail.clone())), sender);

    info!(
        "Using {} for summaries, SMTP relay {}:{} for email",
        summarizer.provider_name(),
        config.mail.smtp_host,
        config.mail.smtp_port
    );

    Ok(AppState {
        summarizer: Arc::new(summarizer),
        mailer: Arc::new(mailer),
        max_upload_bytes: config.server.max_upload_bytes,
    })
}
