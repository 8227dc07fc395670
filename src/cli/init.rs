//! `recap init`: write a starter `.env` file.

use crate::cli::InitCliArgs;
use crate::config::{env_keys, Config};
use crate::global::{API_KEY_PLACEHOLDER, DOTENV_FILE};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn handle_init_command(args: InitCliArgs) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from(DOTENV_FILE));

    println!();
    println!("Recap Setup");
    println!("===========");
    println!();

    if write_env_template(&path, args.force)? {
        println!("Created {}", path.display());
    } else {
        println!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let port = Config::default().server.port;
    println!();
    println!("Next steps:");
    println!("  1. Edit {} and add your credentials:", path.display());
    println!("     - Groq API key: https://console.groq.com -> API Keys");
    println!("     - Gmail app password: Google Account -> Security -> 2-Step Verification -> App passwords");
    println!("  2. Verify the provider:  recap check");
    println!("  3. Start the server:     recap serve");
    println!("  4. Open http://localhost:{}/api/health", port);
    println!();

    Ok(())
}

/// Write the template to `path`. Returns `false` without touching the file
/// when it exists and `force` is not set.
pub fn write_env_template(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create directory for .env file")?;
    }

    fs::write(path, env_template())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(true)
}

pub fn env_template() -> String {
    let defaults = Config::default();

    format!(
        "# Recap environment variables

# Required: get your Groq API key from https://console.groq.com
{groq_key}={placeholder}

# Required for /api/send-email: SMTP credentials (Gmail app password by default)
{email_user}=your_email@gmail.com
{email_password}=your_gmail_app_password_here

# Optional: server settings
{port}={default_port}
# {host}={default_host}
# {max_upload}={default_max_upload}

# Optional: completion provider tuning
# {api_base}={default_api_base}
# {model}={default_model}
# {temperature}={default_temperature}
# {max_tokens}={default_max_tokens}

# Optional: SMTP relay
# {smtp_host}={default_smtp_host}
# {smtp_port}={default_smtp_port}
",
        groq_key = env_keys::GROQ_API_KEY,
        placeholder = API_KEY_PLACEHOLDER,
        email_user = env_keys::EMAIL_USER,
        email_password = env_keys::EMAIL_PASSWORD,
        port = env_keys::PORT,
        default_port = defaults.server.port,
        host = env_keys::HOST,
        default_host = defaults.server.host,
        max_upload = env_keys::MAX_UPLOAD_BYTES,
        default_max_upload = defaults.server.max_upload_bytes,
        api_base = env_keys::GROQ_API_BASE,
        default_api_base = defaults.llm.api_base,
        model = env_keys::GROQ_MODEL,
        default_model = defaults.llm.model,
        temperature = env_keys::GROQ_TEMPERATURE,
        default_temperature = defaults.llm.temperature,
        max_tokens = env_keys::GROQ_MAX_TOKENS,
        default_max_tokens = defaults.llm.max_tokens,
        smtp_host = env_keys::SMTP_HOST,
        default_smtp_host = defaults.mail.smtp_host,
        smtp_port = env_keys::SMTP_PORT,
        default_smtp_port = defaults.mail.smtp_port,
    )
}
