use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::mailer::{Mailer, OutgoingEmail};
use crate::share::validation::validate_share_input;

/// Missing fields deserialize as empty and fail the length checks.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShareRequest {
    pub summary: String,
    pub subject: String,
    /// Comma-separated addresses, exactly as typed into the form.
    pub recipients: String,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub message: String,
    pub recipients: usize,
    pub transport: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

/// Validate, build one email, hand it to the configured transport.
pub async fn share_summary(
    mailer: &dyn Mailer,
    from: &str,
    request: &ShareRequest,
) -> Result<ShareResponse, AppError> {
    let recipients =
        validate_share_input(&request.summary, &request.subject, &request.recipients)?;

    let email = OutgoingEmail::new(from, recipients, &request.subject, &request.summary);
    let receipt = mailer.send(&email).await?;

    info!(
        transport = receipt.transport.as_str(),
        recipients = receipt.accepted,
        "Summary shared"
    );

    Ok(ShareResponse {
        message: format!("Summary shared with {} recipient(s).", receipt.accepted),
        recipients: receipt.accepted,
        transport: receipt.transport.as_str(),
        message_id: receipt.message_id,
    })
}
