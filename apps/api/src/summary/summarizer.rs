use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::SummaryModel;
use crate::summary::prompts::SUMMARY_PROMPT;
use crate::summary::validation::validate_summarize_input;

/// Missing fields deserialize as empty and fail the length checks.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SummarizeRequest {
    pub transcript: String,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_subject: Option<String>,
}

/// Renders the fixed summary template. Placeholders are substituted in a single
/// pass, so braces inside the transcript or prompt are left untouched.
pub fn build_summary_prompt(transcript: &str, prompt: &str) -> String {
    let mut rendered = String::with_capacity(SUMMARY_PROMPT.len() + transcript.len() + prompt.len());
    let mut rest = SUMMARY_PROMPT;

    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(stripped) = tail.strip_prefix("{transcript}") {
            rendered.push_str(transcript);
            rest = stripped;
        } else if let Some(stripped) = tail.strip_prefix("{prompt}") {
            rendered.push_str(prompt);
            rest = stripped;
        } else {
            rendered.push('{');
            rest = &tail[1..];
        }
    }
    rendered.push_str(rest);
    rendered
}

/// Validate, render, and make exactly one completion call.
pub async fn summarize_transcript(
    model: &dyn SummaryModel,
    request: &SummarizeRequest,
) -> Result<String, AppError> {
    validate_summarize_input(&request.transcript, &request.prompt)?;

    let prompt = build_summary_prompt(request.transcript.trim(), request.prompt.trim());
    let summary = model
        .complete(&prompt, PLAIN_TEXT_SYSTEM)
        .await
        .map_err(|e| AppError::Summarization(e.to_string()))?;

    info!(
        transcript_chars = request.transcript.chars().count(),
        summary_chars = summary.chars().count(),
        "Summary generated"
    );
    Ok(summary)
}

/// Default email subject offered after a summary is generated from an upload.
pub fn suggested_subject(file_name: Option<&str>) -> String {
    let name = file_name.map(str::trim).filter(|n| !n.is_empty());
    format!("Summary for {}", name.unwrap_or("Transcript"))
}
