//! In-memory mail outbox. Every message is kept for later inspection.

use async_trait::async_trait;
use tokio::sync::Mutex;

use blog_core::ports::{MailError, MailMessage, MailSender};

#[derive(Default)]
pub struct InMemoryMailSender {
    outbox: Mutex<Vec<MailMessage>>,
}

impl InMemoryMailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    pub async fn sent(&self) -> Vec<MailMessage> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait]
impl MailSender for InMemoryMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        self.outbox.lock().await.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outbox_keeps_messages_in_order() {
        let mailer = InMemoryMailSender::new();
        for subject in ["first", "second"] {
            let message = MailMessage {
                subject: subject.to_string(),
                body: "b".to_string(),
                from: "blog@localhost".to_string(),
                to: vec!["b@x.com".to_string()],
            };
            mailer.send(&message).await.unwrap();
        }

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].subject, "first");
    }
}
