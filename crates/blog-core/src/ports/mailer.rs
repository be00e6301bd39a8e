//! Mail port - abstraction over outgoing e-mail transports.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A plain-text message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

/// Mail sender trait. One call, one delivery attempt, no retry.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

/// Mail delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Relay rejected message: {0}")]
    Rejected(String),

    #[error("Delivery timed out after {0:?}")]
    Timeout(std::time::Duration),
}
