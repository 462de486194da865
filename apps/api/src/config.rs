use std::str::FromStr;

use anyhow::{bail, Context, Result};
use lettre::message::Mailbox;

/// Placeholder shipped in `.env.example`; treated the same as an unset key.
pub const RESEND_KEY_PLACEHOLDER: &str = "your_resend_api_key_here";

const DEFAULT_FROM: &str = "Transcript Tailor <onboarding@resend.dev>";
const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Which of the four delivery strategies the service sends mail through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Resend,
    Console,
    Smtp,
    OAuth2,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Resend => "resend",
            TransportKind::Console => "console",
            TransportKind::Smtp => "smtp",
            TransportKind::OAuth2 => "oauth2",
        }
    }
}

impl FromStr for TransportKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resend" => Ok(TransportKind::Resend),
            "console" | "mock" => Ok(TransportKind::Console),
            "smtp" => Ok(TransportKind::Smtp),
            "oauth2" | "smtp-oauth2" => Ok(TransportKind::OAuth2),
            other => bail!("EMAIL_TRANSPORT '{other}' is not one of resend, console, smtp, oauth2"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS (usually port 465). STARTTLS otherwise.
    pub secure: bool,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct OAuth2Config {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub user: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub token_url: String,
}

/// Transport-specific settings. Only the selected transport's variables are read.
#[derive(Debug, Clone)]
pub enum EmailConfig {
    Resend {
        api_key: Option<String>,
        api_url: String,
    },
    Console,
    Smtp(SmtpConfig),
    OAuth2(OAuth2Config),
}

impl EmailConfig {
    pub fn kind(&self) -> TransportKind {
        match self {
            EmailConfig::Resend { .. } => TransportKind::Resend,
            EmailConfig::Console => TransportKind::Console,
            EmailConfig::Smtp(_) => TransportKind::Smtp,
            EmailConfig::OAuth2(_) => TransportKind::OAuth2,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if variables required by the selected transport are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: Option<String>,
    pub email_from: String,
    pub email: EmailConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let transport: TransportKind = lookup("EMAIL_TRANSPORT")
            .unwrap_or_else(|| "resend".to_string())
            .parse()?;

        let email = match transport {
            TransportKind::Resend => EmailConfig::Resend {
                // Checked per request so a missing key never blocks startup.
                api_key: lookup("RESEND_API_KEY").filter(|k| !k.trim().is_empty()),
                api_url: lookup("RESEND_API_URL")
                    .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
            },
            TransportKind::Console => EmailConfig::Console,
            TransportKind::Smtp => EmailConfig::Smtp(SmtpConfig {
                host: require(&lookup, "SMTP_HOST")?,
                port: smtp_port(&lookup)?,
                secure: flag(&lookup, "SMTP_SECURE"),
                user: require(&lookup, "SMTP_USER")?,
                password: require(&lookup, "SMTP_PASSWORD")?,
            }),
            TransportKind::OAuth2 => EmailConfig::OAuth2(OAuth2Config {
                host: require(&lookup, "SMTP_HOST")?,
                port: smtp_port(&lookup)?,
                secure: flag(&lookup, "SMTP_SECURE"),
                user: require(&lookup, "SMTP_USER")?,
                client_id: require(&lookup, "OAUTH2_CLIENT_ID")?,
                client_secret: require(&lookup, "OAUTH2_CLIENT_SECRET")?,
                refresh_token: require(&lookup, "OAUTH2_REFRESH_TOKEN")?,
                token_url: lookup("OAUTH2_TOKEN_URL")
                    .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            }),
        };

        // SMTP servers generally refuse a sender other than the authenticated user.
        let email_from = lookup("EMAIL_FROM").unwrap_or_else(|| match &email {
            EmailConfig::Smtp(SmtpConfig { user, .. })
            | EmailConfig::OAuth2(OAuth2Config { user, .. }) => {
                format!("Transcript Tailor <{user}>")
            }
            _ => DEFAULT_FROM.to_string(),
        });
        // Every send parses the sender, so an unusable one is refused up front.
        email_from.parse::<Mailbox>().with_context(|| {
            format!(
                "EMAIL_FROM '{email_from}' is not a valid sender address \
                 (set EMAIL_FROM when SMTP_USER is not an email address)"
            )
        })?;

        Ok(Config {
            anthropic_api_key: require(&lookup, "ANTHROPIC_API_KEY")?,
            anthropic_api_url: lookup("ANTHROPIC_API_URL"),
            email_from,
            email,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn smtp_port<F>(lookup: &F) -> Result<u16>
where
    F: Fn(&str) -> Option<String>,
{
    lookup("SMTP_PORT")
        .unwrap_or_else(|| "587".to_string())
        .parse::<u16>()
        .context("SMTP_PORT must be a valid port number")
}

fn flag<F>(lookup: &F, key: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
