//! Summary email dispatch.
//!
//! Validates recipients and summary, renders the HTML template and hands one
//! message addressed to every recipient to the [`MailRelay`].

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::global::DEFAULT_EMAIL_SUBJECT;

mod relay;
mod smtp;
mod template;

pub use relay::{MailRelay, OutgoingEmail};
pub use smtp::{build_message, SmtpRelay};
pub use template::render_summary_html;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Recipients are required")]
    MissingRecipients,
    #[error("Summary is required")]
    MissingSummary,
    #[error(transparent)]
    Relay(#[from] anyhow::Error),
}

/// Trim every entry and drop the blank ones, keeping order.
pub fn clean_recipients(recipients: &[String]) -> Vec<String> {
    recipients
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct Mailer {
    relay: Arc<dyn MailRelay>,
    sender: String,
}

impl Mailer {
    pub fn new(relay: Arc<dyn MailRelay>, sender: impl Into<String>) -> Self {
        Self {
            relay,
            sender: sender.into(),
        }
    }

    /// Email `summary` to every non-blank recipient in a single message.
    pub async fn send_summary(
        &self,
        recipients: &[String],
        subject: Option<&str>,
        summary: Option<&str>,
    ) -> Result<(), MailError> {
        let recipients = clean_recipients(recipients);
        if recipients.is_empty() {
            return Err(MailError::MissingRecipients);
        }

        let summary = summary
            .filter(|s| !s.trim().is_empty())
            .ok_or(MailError::MissingSummary)?;

        let subject = subject
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_EMAIL_SUBJECT);

        let email = OutgoingEmail {
            from: self.sender.clone(),
            to: recipients,
            subject: subject.to_string(),
            html_body: render_summary_html(summary),
        };

        self.relay.send(&email).await.map_err(|e| {
            error!("Error sending email via {}: {:#}", self.relay.name(), e);
            MailError::Relay(e)
        })?;

        info!("Summary emailed to {} recipient(s)", email.to.len());
        Ok(())
    }
}
