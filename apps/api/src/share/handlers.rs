//! Axum route handlers for the Share API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::share::service::{share_summary, ShareRequest, ShareResponse};
use crate::state::AppState;

/// POST /api/v1/share
///
/// Emails the (possibly edited) summary to a comma-separated recipient list
/// through whichever transport the service was started with.
pub async fn handle_share(
    State(state): State<AppState>,
    payload: Result<Json<ShareRequest>, JsonRejection>,
) -> Result<Json<ShareResponse>, AppError> {
    let Json(request) = payload?;
    let response = share_summary(state.mailer.as_ref(), &state.config.email_from, &request).await?;
    Ok(Json(response))
}
