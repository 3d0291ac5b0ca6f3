//! Field-level validation shared by the patch and builder types.

use merchify_core::EmailError;
use thiserror::Error;

/// A user-supplied value was rejected before touching any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field was empty or whitespace.
    #[error("{0} is required")]
    Required(&'static str),

    /// An enumerated field received a value outside its option list.
    #[error("{field}: '{value}' is not an allowed option")]
    UnknownOption {
        /// Field that was being set.
        field: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The email address could not be parsed.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    /// Any other malformed value.
    #[error("{field}: {reason}")]
    Invalid {
        /// Field that was being set.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },
}

/// Reject empty or whitespace-only text.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Trim tags, drop blanks and duplicates, keep first-seen order.
pub(crate) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_owned());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text("name", "Camiseta").is_ok());
        assert_eq!(
            require_text("name", "  \t"),
            Err(ValidationError::Required("name"))
        );
    }

    #[test]
    fn test_normalize_tags() {
        let tags = vec![
            " ropa ".to_string(),
            "casual".to_string(),
            String::new(),
            "ropa".to_string(),
        ];
        assert_eq!(normalize_tags(tags), vec!["ropa", "casual"]);
    }

    #[test]
    fn test_display() {
        let err = ValidationError::UnknownOption {
            field: "teamSize",
            value: "1000".to_string(),
        };
        assert_eq!(err.to_string(), "teamSize: '1000' is not an allowed option");
    }
}
