//! Axum route handlers for the Summary API.

use axum::{
    extract::multipart::MultipartRejection,
    extract::rejection::JsonRejection,
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::summary::summarizer::{
    suggested_subject, summarize_transcript, SummarizeRequest, SummarizeResponse,
};
use crate::summary::validation::{decode_transcript, is_plain_text, MISSING_FILE, NOT_PLAIN_TEXT};

/// POST /api/v1/summaries
///
/// Summarizes a transcript that the client already holds as text.
pub async fn handle_summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let Json(request) = payload?;
    let summary = summarize_transcript(state.llm.as_ref(), &request).await?;

    Ok(Json(SummarizeResponse {
        summary,
        suggested_subject: None,
    }))
}

/// POST /api/v1/summaries/upload
///
/// Multipart form: `file` (a .txt transcript) and `prompt`.
/// Also returns the subject line the share form should start with.
pub async fn handle_summarize_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let mut multipart = multipart?;
    let mut transcript: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut prompt = String::new();

    // Reading past the body limit surfaces here as a 413.
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().map(str::to_string);
                if !is_plain_text(field.content_type(), name.as_deref()) {
                    return Err(AppError::UnsupportedMedia(NOT_PLAIN_TEXT.to_string()));
                }
                let bytes = field.bytes().await?;
                transcript = Some(decode_transcript(&bytes)?);
                file_name = name;
            }
            Some("prompt") => {
                prompt = field.text().await?;
            }
            _ => {}
        }
    }

    let transcript = transcript.ok_or_else(|| AppError::Validation(MISSING_FILE.to_string()))?;
    info!(file = file_name.as_deref().unwrap_or("<unnamed>"), "Transcript uploaded");

    let request = SummarizeRequest { transcript, prompt };
    let summary = summarize_transcript(state.llm.as_ref(), &request).await?;

    Ok(Json(SummarizeResponse {
        summary,
        suggested_subject: Some(suggested_subject(file_name.as_deref())),
    }))
}
