//! Console mail sender - writes messages to the log instead of sending them
//! (for development).

use async_trait::async_trait;

use blog_core::forms::mask_email;
use blog_core::ports::{MailError, MailMessage, MailSender};

pub struct ConsoleMailSender;

#[async_trait]
impl MailSender for ConsoleMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let to: Vec<String> = message.to.iter().map(|addr| mask_email(addr)).collect();
        tracing::info!(
            from = %message.from,
            to = ?to,
            subject = %message.subject,
            body = %message.body,
            "Outgoing mail (console backend)"
        );
        Ok(())
    }
}
