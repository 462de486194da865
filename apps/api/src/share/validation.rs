use std::sync::OnceLock;

use regex::Regex;

use crate::errors::AppError;
use crate::validation::require_min_chars;

pub const MIN_SUMMARY_CHARS: usize = 10;
pub const MIN_SUBJECT_CHARS: usize = 3;

pub const SUMMARY_TOO_SHORT: &str = "Summary must be at least 10 characters long.";
pub const SUBJECT_TOO_SHORT: &str = "Subject must be at least 3 characters long.";
pub const INVALID_RECIPIENTS: &str = "Please provide a valid, comma-separated list of emails.";

/// Address shape accepted by the share form.
///
/// Local part: letters, digits and `_ ' + - .`, ending in anything but `.`.
/// Domain: one or more `label.` groups followed by an alphabetic TLD of 2+ letters.
/// Leading dots and `..` are rejected separately (no lookaround in `regex`).
pub fn is_valid_email(address: &str) -> bool {
    fn re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
                .expect("must be valid regex")
        })
    }

    !address.starts_with('.') && !address.contains("..") && re().is_match(address)
}

/// Splits a comma-separated recipient list. Every entry must be a valid address,
/// so an empty list, a blank entry or a trailing comma is rejected as a whole.
pub fn parse_recipients(raw: &str) -> Result<Vec<String>, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::Validation(INVALID_RECIPIENTS.to_string()));
    }

    raw.split(',')
        .map(str::trim)
        .map(|address| {
            if is_valid_email(address) {
                Ok(address.to_string())
            } else {
                Err(AppError::Validation(INVALID_RECIPIENTS.to_string()))
            }
        })
        .collect()
}

/// Checks summary, subject, then recipients; returns the parsed recipient list.
pub fn validate_share_input(
    summary: &str,
    subject: &str,
    recipients: &str,
) -> Result<Vec<String>, AppError> {
    require_min_chars(summary, MIN_SUMMARY_CHARS, SUMMARY_TOO_SHORT)?;
    require_min_chars(subject, MIN_SUBJECT_CHARS, SUBJECT_TOO_SHORT)?;
    parse_recipients(recipients)
}
