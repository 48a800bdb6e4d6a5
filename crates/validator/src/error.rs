//! Error types for validation calls
//!
//! Validation failures are data, not errors: they are reported in
//! [`ValidationResult::errors`](crate::ValidationResult). [`ValidateError`]
//! covers the conditions that abort a call: malformed Propex, a propex that
//! under-specifies the data, and records that cannot be serialized.

use propex::PropexError;
use thiserror::Error;

/// Result type for validation calls
pub type ValidateResult<T> = Result<T, ValidateError>;

/// Errors that abort a validation call.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ValidateError {
    /// The propex string is malformed
    #[error(transparent)]
    Syntax(#[from] PropexError),

    /// A non-empty array met an array shape with no element shape
    #[error(
        "Array shape not specified at '{path}': propex declares no element shape but the data has {len} element(s)"
    )]
    ShapeNotSpecified { path: String, len: usize },

    /// The record could not be converted to JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ValidateError {
    /// Get error code for categorization
    pub fn code(&self) -> &'static str {
        match self {
            Self::Syntax(err) => err.code(),
            Self::ShapeNotSpecified { .. } => "VALIDATE:SHAPE_NOT_SPECIFIED",
            Self::Json(_) => "VALIDATE:JSON",
        }
    }

    /// Create a shape-not-specified error
    pub fn shape_not_specified(path: impl Into<String>, len: usize) -> Self {
        Self::ShapeNotSpecified {
            path: path.into(),
            len,
        }
    }

    /// True for malformed propex strings
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }

    /// True when the propex is inconsistent with the data it was given
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ShapeNotSpecified { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_not_specified() {
        let err = ValidateError::shape_not_specified("$.tags", 3);
        assert!(err.is_configuration());
        assert!(!err.is_syntax());
        assert_eq!(err.code(), "VALIDATE:SHAPE_NOT_SPECIFIED");
        let display = err.to_string();
        assert!(display.contains("$.tags"));
        assert!(display.contains("3 element(s)"));
    }

    #[test]
    fn test_syntax_is_transparent() {
        let err: ValidateError = PropexError::Empty.into();
        assert!(err.is_syntax());
        assert_eq!(err.code(), "PROPEX:EMPTY");
        assert_eq!(err.to_string(), PropexError::Empty.to_string());
    }
}
