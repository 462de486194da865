use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::mailer::MailError;

/// User-facing message for any failure while generating a summary.
/// The underlying cause is logged, never returned.
pub const SUMMARY_FAILED_MESSAGE: &str =
    "An unexpected error occurred while generating the summary.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UnsupportedMedia(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Failed to send email: {0}")]
    Delivery(#[from] MailError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedMedia(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::Summarization(msg) => {
                tracing::error!("Summarization error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    SUMMARY_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::Delivery(MailError::NotConfigured(msg)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "EMAIL_NOT_CONFIGURED",
                msg.clone(),
            ),
            AppError::Delivery(e) => {
                tracing::error!("Sharing error: {e}");
                (StatusCode::BAD_GATEWAY, "EMAIL_ERROR", self.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Message for an upload over the route's body limit.
pub const UPLOAD_TOO_LARGE: &str = "Transcript file is too large (max 5 MB).";

// Extractor rejections keep the service-wide error shape instead of axum's
// plain-text 4xx bodies.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Validation(format!("Malformed upload: {}", rejection.body_text()))
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(UPLOAD_TOO_LARGE.to_string())
        } else {
            AppError::Validation(format!("Malformed upload: {}", err.body_text()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_message_is_returned_verbatim() {
        let (status, body) = body_json(AppError::Validation(
            "Prompt must be at least 5 characters long.".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Prompt must be at least 5 characters long."
        );
    }

    #[tokio::test]
    async fn test_payload_too_large_keeps_413() {
        let (status, body) = body_json(AppError::PayloadTooLarge(UPLOAD_TOO_LARGE.into())).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(body["error"]["message"], UPLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_summarization_details_are_hidden() {
        let (status, body) =
            body_json(AppError::Summarization("API error (status 401): bad key".into())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["message"], SUMMARY_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_delivery_error_carries_transport_message() {
        let (status, body) =
            body_json(AppError::Delivery(MailError::Rejected("domain not verified".into()))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "EMAIL_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Failed to send email: domain not verified"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_transport_is_not_prefixed() {
        let (status, body) = body_json(AppError::Delivery(MailError::NotConfigured(
            "Resend API key is not configured. Please add it to your .env file.".into(),
        )))
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body["error"]["message"],
            "Resend API key is not configured. Please add it to your .env file."
        );
    }
}
