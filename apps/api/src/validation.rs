//! Field rules shared by lead and application submissions.
//!
//! Every check returns `Result<_, ValidationError>` naming the offending field,
//! so handlers never see a half-validated record.

use thiserror::Error;
use validator::ValidateEmail;

/// A client-caused rejection tied to a single submitted field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Unwraps a field that must be present, whatever its content.
pub fn require<'a>(
    field: &'static str,
    value: &'a Option<String>,
) -> Result<&'a str, ValidationError> {
    value
        .as_deref()
        .ok_or_else(|| ValidationError::new(field, "Field is required"))
}

/// Trims `value` and checks its character count lies in `min..=max`.
pub fn required_text(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            field,
            "Field cannot be empty or only whitespace",
        ));
    }
    check_length(field, trimmed, min, max)?;
    Ok(trimmed.to_string())
}

/// Empty or whitespace-only input is treated as absent.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            check_length(field, trimmed, 1, max)?;
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Like [`optional_text`] but without an upper bound.
pub fn optional_free_text(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None | Some("") => None,
        Some(trimmed) => Some(trimmed.to_string()),
    }
}

/// Character-count bounds, inclusive on both ends.
pub fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::new(
            field,
            format!("Must be at least {min} characters"),
        ));
    }
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("Must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Syntactic mailbox check (no DNS lookup). Returns the trimmed address.
pub fn email(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let candidate = value.trim();
    if !candidate.validate_email() {
        return Err(ValidationError::new(
            field,
            "Value is not a valid email address",
        ));
    }
    Ok(candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("name", "  Ada  ", 2, 255).unwrap(), "Ada");
    }

    #[test]
    fn test_required_text_rejects_whitespace_only() {
        let err = required_text("company", "   ", 2, 255).unwrap_err();
        assert_eq!(err.field, "company");
    }

    #[test]
    fn test_required_text_rejects_short_after_trim() {
        assert!(required_text("name", " A ", 2, 255).is_err());
    }

    #[test]
    fn test_required_text_rejects_too_long() {
        let long = "x".repeat(256);
        assert!(required_text("job_title", &long, 2, 255).is_err());
        assert!(required_text("job_title", &long[..255], 2, 255).is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 5 characters, 10 bytes
        assert!(check_length("name", "ÅÅÅÅÅ", 2, 5).is_ok());
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(optional_text("note", Some("  "), 10).unwrap(), None);
        assert_eq!(optional_text("note", None, 10).unwrap(), None);
        assert_eq!(
            optional_text("note", Some(" hi "), 10).unwrap(),
            Some("hi".to_string())
        );
    }

    #[test]
    fn test_email_accepts_common_addresses() {
        for ok in [
            "ada@example.com",
            "first.last+tag@sub.example.co.uk",
            "o'brien@example.ie",
            "  padded@example.com  ",
        ] {
            assert!(email("email", ok).is_ok(), "{ok} should be valid");
        }
    }

    #[test]
    fn test_email_returns_trimmed_value() {
        assert_eq!(email("email", " a@b.io ").unwrap(), "a@b.io");
    }

    #[test]
    fn test_email_rejects_malformed() {
        for bad in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@localhost",
            "user@@example.com",
            "user@-example.com",
            "user@example..com",
            "user name@example.com",
        ] {
            let err = email("email", bad).unwrap_err();
            assert_eq!(err.field, "email", "{bad} should be rejected");
        }
    }

    #[test]
    fn test_email_rejects_long_local_part() {
        let addr = format!("{}@example.com", "a".repeat(65));
        assert!(email("email", &addr).is_err());
    }

    #[test]
    fn test_free_text_keeps_long_input() {
        let long = "n".repeat(20_000);
        assert_eq!(optional_free_text(Some(&long)).unwrap().len(), 20_000);
        assert_eq!(optional_free_text(Some(" \t ")), None);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("phone", "Invalid phone number format");
        assert_eq!(err.to_string(), "phone: Invalid phone number format");
    }
}
