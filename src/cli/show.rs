//! `recap config`: print the effective configuration.

use crate::config::Config;
use anyhow::Result;

pub fn handle_config_command() -> Result<()> {
    let config = Config::load()?;
    print!("{}", render_config(&config));
    Ok(())
}

pub fn render_config(config: &Config) -> String {
    let mut out = String::new();
    let mut line = |text: String| {
        out.push_str(&text);
        out.push('\n');
    };

    line(String::new());
    line("Recap Configuration".to_string());
    line("===================".to_string());
    line(String::new());
    line("Server:".to_string());
    line(format!("  Listen:      {}:{}", config.server.host, config.server.port));
    line(format!("  Upload max:  {} bytes", config.server.max_upload_bytes));
    line(String::new());
    line("Completion provider:".to_string());
    line(format!("  Key:         {}", mask_secret(&config.llm.api_key)));
    line(format!("  Endpoint:    {}", config.llm.api_base));
    line(format!("  Model:       {}", config.llm.model));
    line(format!("  Temperature: {}", config.llm.temperature));
    line(format!("  Max tokens:  {}", config.llm.max_tokens));
    line(String::new());
    line("Mail relay:".to_string());
    line(format!("  User:        {}", display_value(&config.mail.username)));
    line(format!("  Password:    {}", mask_secret(&config.mail.password)));
    line(format!(
        "  SMTP:        {}:{}",
        config.mail.smtp_host, config.mail.smtp_port
    ));

    out
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(secret) if secret.chars().count() > 8 => {
            let prefix: String = secret.chars().take(4).collect();
            let suffix: String = secret.chars().skip(secret.chars().count() - 2).collect();
            format!("{prefix}****{suffix}")
        }
        Some(secret) if !secret.is_empty() => "*".repeat(secret.chars().count()),
        _ => "<not set>".to_string(),
    }
}
