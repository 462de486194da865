use async_trait::async_trait;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{OAuth2Config, TransportKind};
use crate::mailer::smtp::{deliver, relay_builder};
use crate::mailer::{DeliveryReceipt, MailError, Mailer, OutgoingEmail};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// SMTP authenticated with XOAUTH2. A fresh access token is obtained from the
/// refresh token on every send; nothing is cached between requests.
pub struct OAuth2SmtpMailer {
    client: Client,
    config: OAuth2Config,
}

impl OAuth2SmtpMailer {
    pub fn new(config: OAuth2Config) -> Result<Self, MailError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            config,
        })
    }

    /// Exchanges the configured refresh token for an access token.
    pub async fn refresh_access_token(&self) -> Result<String, MailError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", self.config.refresh_token.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "OAuth2 token refresh rejected (check client id/secret/refresh token)");
            let message = serde_json::from_str::<TokenError>(&body)
                .map(|e| match e.error_description {
                    Some(desc) => format!("{}: {desc}", e.error),
                    None => e.error,
                })
                .unwrap_or_else(|_| format!("token endpoint returned {status}"));
            return Err(MailError::OAuth(message));
        }

        let token: TokenResponse = response.json().await?;
        debug!(expires_in = ?token.expires_in, "OAuth2 access token refreshed");
        Ok(token.access_token)
    }
}

#[async_trait]
impl Mailer for OAuth2SmtpMailer {
    fn kind(&self) -> TransportKind {
        TransportKind::OAuth2
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, MailError> {
        let access_token = self.refresh_access_token().await?;

        let transport = relay_builder(&self.config.host, self.config.port, self.config.secure)?
            .credentials(Credentials::new(self.config.user.clone(), access_token))
            .authentication(vec![Mechanism::Xoauth2])
            .build();

        deliver(&transport, TransportKind::OAuth2, email).await
    }
}
