use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::config::TransportKind;
use crate::mailer::{DeliveryReceipt, MailError, Mailer, OutgoingEmail};

/// Development transport: writes the email to the log and reports success.
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    fn kind(&self) -> TransportKind {
        TransportKind::Console
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, MailError> {
        let message_id = format!("console-{}", Uuid::new_v4());

        info!(
            message_id = %message_id,
            from = %email.from,
            to = %email.to.join(", "),
            subject = %email.subject,
            "Email (console transport, not delivered)\n{}",
            email.text
        );

        Ok(DeliveryReceipt {
            transport: TransportKind::Console,
            accepted: email.to.len(),
            message_id: Some(message_id),
        })
    }
}
