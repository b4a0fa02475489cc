//! Error types for value object construction.

use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field } => field,
            ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_displays_field_name() {
        let err = ValidationError::empty_field("TradeDesc");
        assert_eq!(err.to_string(), "Field 'TradeDesc' cannot be empty");
    }

    #[test]
    fn invalid_format_displays_reason() {
        let err = ValidationError::invalid_format("TotalAmount", "must be a positive integer");
        assert_eq!(
            err.to_string(),
            "Field 'TotalAmount' has invalid format: must be a positive integer"
        );
    }

    #[test]
    fn field_accessor_returns_name_for_both_variants() {
        assert_eq!(ValidationError::empty_field("ItemName").field(), "ItemName");
        assert_eq!(
            ValidationError::invalid_format("Language", "unknown").field(),
            "Language"
        );
    }
}
