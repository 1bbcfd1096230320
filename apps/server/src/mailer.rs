//! HTTP relay mailer.
//!
//! Delivery goes through a JSON POST to a configured relay endpoint. With no
//! relay configured every send fails, which the inquiry flow reports as a
//! warning instead of an error response.

use async_trait::async_trait;
use meridian_core::errors::{Error, Result};
use meridian_core::mail::{MailerTrait, OutboundEmail};
use serde::Serialize;

pub struct RelayMailer {
    client: reqwest::Client,
    relay_url: Option<String>,
}

impl RelayMailer {
    pub fn new(relay_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            relay_url,
        }
    }
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
}

#[async_trait]
impl MailerTrait for RelayMailer {
    async fn send(&self, email: OutboundEmail) -> Result<()> {
        let Some(url) = &self.relay_url else {
            tracing::error!(subject = %email.subject, "No mail relay configured, dropping email");
            return Err(Error::MailDelivery("no mail relay configured".to_string()));
        };

        let payload = RelayPayload {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            text: &email.body,
        };
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::MailDelivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::MailDelivery(format!(
                "relay returned {}",
                response.status()
            )));
        }
        tracing::info!(subject = %email.subject, recipients = email.to.len(), "Email relayed");
        Ok(())
    }
}
