//! Error types.
//!
//! `ParseError` describes why a single scenario record was rejected.
//! `ServeError` is the crate-level error returned by loading, validation,
//! configuration and reporting.

use thiserror::Error;

use crate::validation::ValidationError;

/// A scenario record could not be turned into a [`Customer`](crate::models::Customer).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid {field}: {value:?} is not a non-negative integer")]
    InvalidInteger { field: &'static str, value: String },

    #[error("invalid profit: {value:?} is not a finite non-negative number")]
    InvalidProfit { value: String },

    #[error("preparation time must be at least one turn")]
    ZeroPrepTime,
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("line {line}: {source} in record {record:?}")]
    Record {
        line: usize,
        record: String,
        #[source]
        source: ParseError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid scenario: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error("unknown policy: {0}")]
    UnknownPolicy(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_record_error_names_line_and_text() {
        let err = ServeError::Record {
            line: 3,
            record: "1 2 x 4 5".into(),
            source: ParseError::InvalidProfit { value: "x".into() },
        };
        let msg = err.to_string();
        assert!(msg.starts_with("line 3:"));
        assert!(msg.contains("\"1 2 x 4 5\""));
        assert!(msg.contains("invalid profit"));
    }

    #[test]
    fn test_validation_error_joins_messages() {
        let err = ServeError::Validation(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate customer ID: 7"),
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate customer ID: 9"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid scenario: Duplicate customer ID: 7; Duplicate customer ID: 9"
        );
    }
}
