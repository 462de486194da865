use crate::errors::AppError;
use crate::validation::require_min_chars;

pub const MIN_TRANSCRIPT_CHARS: usize = 10;
pub const MIN_PROMPT_CHARS: usize = 5;

pub const TRANSCRIPT_TOO_SHORT: &str = "Transcript must be at least 10 characters long.";
pub const PROMPT_TOO_SHORT: &str = "Prompt must be at least 5 characters long.";
pub const NOT_PLAIN_TEXT: &str = "Please upload a plain text (.txt) file.";
pub const MISSING_FILE: &str = "Please upload a transcript file.";

/// Checks the transcript first, then the prompt; reports the first failure.
pub fn validate_summarize_input(transcript: &str, prompt: &str) -> Result<(), AppError> {
    require_min_chars(transcript, MIN_TRANSCRIPT_CHARS, TRANSCRIPT_TOO_SHORT)?;
    require_min_chars(prompt, MIN_PROMPT_CHARS, PROMPT_TOO_SHORT)?;
    Ok(())
}

/// Accepts `text/plain` (any charset parameter). Browsers that send no type, or the
/// generic `application/octet-stream`, fall back to the `.txt` extension.
pub fn is_plain_text(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());

    match essence.as_deref() {
        Some("text/plain") => true,
        None | Some("") | Some("application/octet-stream") => file_name
            .map(|name| name.to_ascii_lowercase().ends_with(".txt"))
            .unwrap_or(false),
        Some(_) => false,
    }
}

/// Decodes an uploaded transcript. Anything that is not UTF-8 is rejected as non-text.
pub fn decode_transcript(bytes: &[u8]) -> Result<String, AppError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| AppError::UnsupportedMedia(NOT_PLAIN_TEXT.to_string()))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_summarize_input(
            "Alice: ship it Friday. Bob: agreed.",
            "List the action items"
        )
        .is_ok());
    }

    #[test]
    fn test_short_transcript_rejected() {
        let err = validate_summarize_input("too short", "List the action items").unwrap_err();
        assert_eq!(err.to_string(), TRANSCRIPT_TOO_SHORT);
    }

    #[test]
    fn test_padded_transcript_counts_raw_length() {
        // 10 characters including the surrounding spaces
        assert!(validate_summarize_input("   hi     ", "List items").is_ok());
    }

    #[test]
    fn test_short_prompt_rejected() {
        let err = validate_summarize_input("Alice: ship it Friday.", "tl;d").unwrap_err();
        assert_eq!(err.to_string(), PROMPT_TOO_SHORT);
    }

    #[test]
    fn test_transcript_reported_before_prompt() {
        let err = validate_summarize_input("", "").unwrap_err();
        assert_eq!(err.to_string(), TRANSCRIPT_TOO_SHORT);
    }

    #[test]
    fn test_plain_text_content_type() {
        assert!(is_plain_text(Some("text/plain"), None));
        assert!(is_plain_text(Some("text/plain; charset=utf-8"), Some("notes.md")));
        assert!(is_plain_text(Some("TEXT/PLAIN"), None));
    }

    #[test]
    fn test_other_content_types_rejected() {
        assert!(!is_plain_text(Some("application/pdf"), Some("notes.txt")));
        assert!(!is_plain_text(Some("text/html"), Some("notes.txt")));
    }

    #[test]
    fn test_extension_fallback() {
        assert!(is_plain_text(None, Some("Standup.TXT")));
        assert!(is_plain_text(Some("application/octet-stream"), Some("standup.txt")));
        assert!(!is_plain_text(None, Some("standup.docx")));
        assert!(!is_plain_text(None, None));
    }

    #[test]
    fn test_decode_strips_bom() {
        let bytes = b"\xef\xbb\xbfAlice: hello";
        assert_eq!(decode_transcript(bytes).unwrap(), "Alice: hello");
    }

    #[test]
    fn test_decode_rejects_binary() {
        let err = decode_transcript(&[0xff, 0xfe, 0x00, 0x41]).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedMedia(_)));
    }
}
