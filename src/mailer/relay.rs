use anyhow::Result;
use async_trait::async_trait;

/// A fully composed message ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub from: String,
    /// Every address lands in a single `To` header.
    pub to: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// Outbound mail delivery. Implementations either deliver the whole message
/// or fail; there is no per-recipient result.
#[async_trait]
pub trait MailRelay: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, email: &OutgoingEmail) -> Result<()>;
}
