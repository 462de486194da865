//! Outbound email. Exactly one `Mailer` is selected at startup from `EMAIL_TRANSPORT`
//! and carried in `AppState` as `Arc<dyn Mailer>`.
//!
//! Each send is a single attempt with no queue behind it.
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, EmailConfig, TransportKind};

pub mod console;
pub mod oauth2;
pub mod resend;
pub mod smtp;

pub use console::ConsoleMailer;
pub use oauth2::OAuth2SmtpMailer;
pub use resend::ResendMailer;
pub use smtp::SmtpMailer;

#[derive(Debug, Error)]
pub enum MailError {
    /// The selected transport is missing settings it needs at send time.
    #[error("{0}")]
    NotConfigured(String),

    /// The provider answered but refused the message.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("{0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("OAuth2 token refresh failed: {0}")]
    OAuth(String),
}

/// A validated share request, ready for a transport.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl OutgoingEmail {
    /// Builds the email with an HTML alternative rendered from the plain summary.
    pub fn new(from: &str, to: Vec<String>, subject: &str, summary: &str) -> Self {
        Self {
            from: from.to_string(),
            to,
            subject: subject.trim().to_string(),
            text: summary.to_string(),
            html: render_html(summary),
        }
    }
}

/// What the transport reported back for one send.
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    pub transport: TransportKind,
    /// Recipients handed to the transport in the accepted call.
    pub accepted: usize,
    pub message_id: Option<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    fn kind(&self) -> TransportKind;

    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, MailError>;
}

/// Selects and constructs the configured transport.
pub fn build_mailer(config: &Config) -> Result<Arc<dyn Mailer>> {
    debug!(transport = config.email.kind().as_str(), "Building email transport");
    let mailer: Arc<dyn Mailer> = match &config.email {
        EmailConfig::Resend { api_key, api_url } => {
            Arc::new(ResendMailer::new(api_key.clone(), api_url.clone())?)
        }
        EmailConfig::Console => Arc::new(ConsoleMailer),
        EmailConfig::Smtp(smtp) => Arc::new(SmtpMailer::new(smtp)?),
        EmailConfig::OAuth2(oauth) => Arc::new(OAuth2SmtpMailer::new(oauth.clone())?),
    };
    Ok(mailer)
}

/// Renders the summary as one HTML paragraph with line breaks preserved.
/// Markup in the summary is escaped, never interpreted.
pub fn render_html(summary: &str) -> String {
    let mut html = String::with_capacity(summary.len() + 16);
    html.push_str("<p>");
    let normalized = summary.replace("\r\n", "\n");
    for ch in normalized.chars() {
        match ch {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '"' => html.push_str("&quot;"),
            '\'' => html.push_str("&#39;"),
            '\n' => html.push_str("<br>"),
            c => html.push(c),
        }
    }
    html.push_str("</p>");
    html
}
