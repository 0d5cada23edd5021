//! # Error Types
//!
//! Structured error types for survey_core. Every variant carries enough
//! context for a front end to point the user at the field or step that
//! needs attention, and every variant serializes to JSON.
//!
//! ## Example
//!
//! ```rust
//! use survey_core::errors::{SurveyError, SurveyResult};
//!
//! fn validate_width(width_ft: f64) -> SurveyResult<()> {
//!     if width_ft < 0.0 {
//!         return Err(SurveyError::InvalidInput {
//!             field: "width_ft".to_string(),
//!             value: width_ft.to_string(),
//!             reason: "Width cannot be negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_width(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::FieldError;
use crate::wizard::Step;

/// Result type alias for survey_core operations
pub type SurveyResult<T> = Result<T, SurveyError>;

/// Structured error type for survey operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SurveyError {
    /// The current step has unmet required fields
    #[error("Step '{step}' has {} invalid field(s)", .errors.len())]
    ValidationFailed { step: Step, errors: Vec<FieldError> },

    /// An input value is invalid (out of range, unknown option, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A room or room part id does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// The wizard refused a step transition
    #[error("Cannot move from '{from}' to '{to}': {reason}")]
    NavigationRefused { from: Step, to: Step, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SurveyError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        SurveyError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        SurveyError::MissingField {
            field: field.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(kind: impl Into<String>, id: impl ToString) -> Self {
        SurveyError::NotFound {
            kind: kind.into(),
            id: id.to_string(),
        }
    }

    /// Create a NavigationRefused error
    pub fn navigation_refused(from: Step, to: Step, reason: impl Into<String>) -> Self {
        SurveyError::NavigationRefused {
            from,
            to,
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        SurveyError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Field errors attached to a validation failure, empty for other variants
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            SurveyError::ValidationFailed { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Whether the user can fix the problem and retry within the same session
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SurveyError::ValidationFailed { .. }
                | SurveyError::InvalidInput { .. }
                | SurveyError::MissingField { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SurveyError::ValidationFailed { .. } => "VALIDATION_FAILED",
            SurveyError::InvalidInput { .. } => "INVALID_INPUT",
            SurveyError::MissingField { .. } => "MISSING_FIELD",
            SurveyError::NotFound { .. } => "NOT_FOUND",
            SurveyError::NavigationRefused { .. } => "NAVIGATION_REFUSED",
            SurveyError::FileError { .. } => "FILE_ERROR",
            SurveyError::SerializationError { .. } => "SERIALIZATION_ERROR",
            SurveyError::VersionMismatch { .. } => "VERSION_MISMATCH",
            SurveyError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for SurveyError {
    fn from(e: serde_json::Error) -> Self {
        SurveyError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SurveyError::invalid_input("width_ft", "-5", "Width cannot be negative");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: SurveyError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SurveyError::missing_field("name").error_code(), "MISSING_FIELD");
        assert_eq!(SurveyError::not_found("Room", "abc").error_code(), "NOT_FOUND");
        assert_eq!(
            SurveyError::navigation_refused(Step::Certificate, Step::Settings, "x").error_code(),
            "NAVIGATION_REFUSED"
        );
    }

    #[test]
    fn test_validation_failure_message_counts_fields() {
        let error = SurveyError::ValidationFailed {
            step: Step::ProjectInfo,
            errors: vec![
                FieldError::new("name", "Project name is required"),
                FieldError::new("owner", "Owner name is required"),
            ],
        };
        assert_eq!(error.to_string(), "Step 'Project Info' has 2 invalid field(s)");
        assert_eq!(error.field_errors().len(), 2);
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_file_errors_are_not_recoverable() {
        let error = SurveyError::file_error("write", "/tmp/x", "denied");
        assert!(!error.is_recoverable());
        assert!(error.field_errors().is_empty());
    }
}
