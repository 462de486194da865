use crate::errors::AppError;

/// Fails with `message` unless `value` has at least `min` characters.
/// Characters are Unicode scalar values, not bytes. Whitespace counts.
pub fn require_min_chars(value: &str, min: usize, message: &str) -> Result<(), AppError> {
    if value.chars().count() < min {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_minimum_passes() {
        assert!(require_min_chars("abcde", 5, "too short").is_ok());
    }

    #[test]
    fn test_whitespace_counts_toward_minimum() {
        assert!(require_min_chars("   hi     ", 10, "too short").is_ok());
        assert!(require_min_chars("         ", 10, "too short").is_err());
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // 5 chars, 10 bytes
        assert!(require_min_chars("ééééé", 5, "too short").is_ok());
        assert!(require_min_chars("éééé", 5, "too short").is_err());
    }
}
