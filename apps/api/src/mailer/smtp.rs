use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::AsyncSmtpTransportBuilder;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::config::{SmtpConfig, TransportKind};
use crate::mailer::{DeliveryReceipt, MailError, Mailer, OutgoingEmail};

/// Converts an outgoing email into a `multipart/alternative` MIME message
/// carrying a generated `Message-ID`.
pub fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(email.from.parse::<Mailbox>()?)
        .subject(email.subject.as_str())
        .message_id(None);

    for recipient in &email.to {
        builder = builder.to(recipient.parse::<Mailbox>()?);
    }

    Ok(builder.multipart(MultiPart::alternative_plain_html(
        email.text.clone(),
        email.html.clone(),
    ))?)
}

/// Implicit TLS when `secure`, STARTTLS otherwise.
pub fn relay_builder(
    host: &str,
    port: u16,
    secure: bool,
) -> Result<AsyncSmtpTransportBuilder, MailError> {
    let builder = if secure {
        AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
    };
    Ok(builder.port(port))
}

/// Sends one message. The receipt carries the message's own `Message-ID`;
/// the server's reply text is only logged.
pub async fn deliver(
    transport: &AsyncSmtpTransport<Tokio1Executor>,
    kind: TransportKind,
    email: &OutgoingEmail,
) -> Result<DeliveryReceipt, MailError> {
    let message = build_message(email)?;
    let message_id = header_message_id(&message);
    let response = transport.send(message).await?;
    debug!(
        code = %response.code(),
        reply = response.first_line().unwrap_or_default(),
        recipients = email.to.len(),
        "SMTP server accepted email"
    );

    Ok(DeliveryReceipt {
        transport: kind,
        accepted: email.to.len(),
        message_id,
    })
}

fn header_message_id(message: &Message) -> Option<String> {
    message.headers().get_raw("Message-ID").map(str::to_string)
}

/// SMTP with username/password (PLAIN or LOGIN).
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = relay_builder(&config.host, config.port, config.secure)?
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .authentication(vec![Mechanism::Plain, Mechanism::Login])
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn kind(&self) -> TransportKind {
        TransportKind::Smtp
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, MailError> {
        deliver(&self.transport, TransportKind::Smtp, email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &[&str]) -> OutgoingEmail {
        OutgoingEmail::new(
            "Transcript Tailor <bot@example.com>",
            to.iter().map(|s| s.to_string()).collect(),
            "Summary for standup.txt",
            "- Ship Friday\n- Bob owns QA",
        )
    }

    #[test]
    fn test_message_has_all_recipients_and_both_parts() {
        let message = build_message(&email(&["a@example.com", "b@example.com"])).unwrap();
        let envelope = message.envelope();
        assert_eq!(envelope.to().len(), 2);
        assert_eq!(
            envelope.from().map(|a| a.to_string()).as_deref(),
            Some("bot@example.com")
        );

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Summary for standup.txt"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_receipt_id_is_the_message_id_header() {
        let message = build_message(&email(&["a@example.com"])).unwrap();
        let id = header_message_id(&message).unwrap();
        assert!(id.starts_with('<') && id.ends_with('>') && id.contains('@'));

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains(&format!("Message-ID: {id}")));

        let other = build_message(&email(&["a@example.com"])).unwrap();
        assert_ne!(header_message_id(&other).unwrap(), id);
    }

    #[test]
    fn test_bad_sender_is_an_address_error() {
        let mut bad = email(&["a@example.com"]);
        bad.from = "not an address".to_string();
        assert!(matches!(build_message(&bad), Err(MailError::Address(_))));
    }

    #[tokio::test]
    async fn test_mailer_builds_without_connecting() {
        let mailer = SmtpMailer::new(&SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 2525,
            secure: false,
            user: "bot@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .unwrap();
        assert_eq!(mailer.kind(), TransportKind::Smtp);
    }
}
