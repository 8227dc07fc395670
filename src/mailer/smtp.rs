use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use super::relay::{MailRelay, OutgoingEmail};
use crate::config::MailConfig;

/// SMTP relay over STARTTLS. A new transport is built for every message.
pub struct SmtpRelay {
    config: MailConfig,
}

impl SmtpRelay {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let username = self
            .config
            .username
            .clone()
            .context("EMAIL_USER is not configured")?;
        let password = self
            .config
            .password
            .clone()
            .context("EMAIL_PASSWORD is not configured")?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)
            .context("Failed to create SMTP transport")?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(username, password))
            .authentication(vec![Mechanism::Plain, Mechanism::Login])
            .build();

        Ok(transport)
    }
}

/// Build the MIME message; fails on unparseable addresses.
pub fn build_message(email: &OutgoingEmail) -> Result<Message> {
    let from = email
        .from
        .parse::<Mailbox>()
        .context("Invalid from address")?;

    let mut builder = Message::builder().from(from).subject(&email.subject);

    for to_addr in &email.to {
        let to_mailbox = to_addr
            .parse::<Mailbox>()
            .context(format!("Invalid recipient address: {}", to_addr))?;
        builder = builder.to(to_mailbox);
    }

    builder
        .header(ContentType::TEXT_HTML)
        .body(email.html_body.clone())
        .context("Failed to build email message")
}

#[async_trait]
impl MailRelay for SmtpRelay {
    fn name(&self) -> &'static str {
        "SMTP"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let transport = self.transport()?;
        let message = build_message(email)?;

        transport
            .send(message)
            .await
            .context("Failed to send email")?;

        info!(
            "Email sent via {}:{} to {}",
            self.config.smtp_host,
            self.config.smtp_port,
            email.to.join(", ")
        );
        Ok(())
    }
}
