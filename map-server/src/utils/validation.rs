//! Input validation helpers
//!
//! Centralized text length constants and validation functions for
//! request fields. Snapshot-level validation lives with the model
//! (`shared::MapSnapshot::validate`); these guard the plain-string
//! fields of a request before it reaches the domain.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Short identifiers: room ids, seat ids, session ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(format!("{field} is required")));
    }
    if value.len() > max_len {
        return Err(AppError::bad_request(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Extract a required request field, then length-check it.
pub fn require_field(value: Option<String>, field: &str) -> Result<String, AppError> {
    let value = value.ok_or_else(|| AppError::bad_request(format!("{field} is required")))?;
    validate_required_text(&value, field, MAX_SHORT_TEXT_LEN)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_rejected() {
        assert!(validate_required_text("", "roomId", MAX_SHORT_TEXT_LEN).is_err());
        assert!(validate_required_text("   ", "roomId", MAX_SHORT_TEXT_LEN).is_err());
        assert!(validate_required_text("sala-1", "roomId", MAX_SHORT_TEXT_LEN).is_ok());
    }

    #[test]
    fn over_long_rejected() {
        let long = "x".repeat(MAX_SHORT_TEXT_LEN + 1);
        assert!(validate_required_text(&long, "roomId", MAX_SHORT_TEXT_LEN).is_err());
    }

    #[test]
    fn missing_field_rejected() {
        assert!(require_field(None, "sessionId").is_err());
        assert_eq!(
            require_field(Some("abc".into()), "sessionId").unwrap(),
            "abc"
        );
    }
}
