//! Webhook mail sender - hands messages to an HTTP mail relay as JSON.

use async_trait::async_trait;

use blog_core::ports::{MailError, MailMessage, MailSender};

pub struct WebhookMailSender {
    url: String,
    client: reqwest::Client,
}

impl WebhookMailSender {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MailSender for WebhookMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let payload = serde_json::json!({
            "from": message.from,
            "to": message.to,
            "subject": message.subject,
            "text": message.body,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Rejected(format!("relay answered {status}")));
        }

        Ok(())
    }
}
