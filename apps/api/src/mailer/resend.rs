use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{TransportKind, RESEND_KEY_PLACEHOLDER};
use crate::mailer::{DeliveryReceipt, MailError, Mailer, OutgoingEmail};

pub const RESEND_NOT_CONFIGURED: &str =
    "Resend API key is not configured. Please add it to your .env file.";

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendError {
    message: String,
}

/// Transactional email through the Resend HTTP API.
pub struct ResendMailer {
    client: Client,
    api_key: Option<String>,
    api_url: String,
}

impl ResendMailer {
    pub fn new(api_key: Option<String>, api_url: String) -> Result<Self, MailError> {
        let api_key = api_key.filter(|k| k != RESEND_KEY_PLACEHOLDER);
        if api_key.is_none() {
            warn!("RESEND_API_KEY is not set; sharing will fail until it is configured");
        }

        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    fn kind(&self) -> TransportKind {
        TransportKind::Resend
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, MailError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| MailError::NotConfigured(RESEND_NOT_CONFIGURED.to_string()))?;

        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(api_key)
            .json(&ResendRequest {
                from: &email.from,
                to: &email.to,
                subject: &email.subject,
                text: &email.text,
                html: &email.html,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ResendError>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| format!("Resend returned {status}"));
            return Err(MailError::Rejected(message));
        }

        let sent: ResendResponse = response.json().await?;
        debug!(message_id = %sent.id, recipients = email.to.len(), "Resend accepted email");

        Ok(DeliveryReceipt {
            transport: TransportKind::Resend,
            accepted: email.to.len(),
            message_id: Some(sent.id),
        })
    }
}
