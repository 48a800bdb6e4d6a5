//! Error types for Propex parsing
//!
//! Uses thiserror for clean, idiomatic Rust error definitions. Every variant
//! carries the byte offset in the source where the problem was detected.

use thiserror::Error;

/// Result type for Propex parsing.
pub type PropexResult<T> = Result<T, PropexError>;

/// Syntax errors raised while parsing a Propex string.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropexError {
    /// The source contains nothing but whitespace
    #[error("Propex syntax error: expression is empty")]
    Empty,

    /// The source does not start with `{` or `[`
    #[error("Propex syntax error at {offset}: expected '{{' or '[' but found '{found}'")]
    UnexpectedRoot { found: char, offset: usize },

    /// A field name is missing (`{,}`, `{a,}`, `{{b}}`)
    #[error("Propex syntax error at {offset}: field name is empty")]
    EmptyFieldName { offset: usize },

    /// An opening bracket has no matching close
    #[error("Propex syntax error at {offset}: '{open}' is never closed")]
    Unclosed { open: char, offset: usize },

    /// A character appeared where another token was required
    #[error("Propex syntax error at {offset}: expected {expected}, found '{found}'")]
    Unexpected {
        expected: &'static str,
        found: char,
        offset: usize,
    },

    /// Input continues after the root shape was closed
    #[error("Propex syntax error at {offset}: unexpected input after the root shape")]
    TrailingInput { offset: usize },

    /// A field name occurs twice within the same object
    #[error("Propex syntax error at {offset}: field '{name}' is declared twice")]
    DuplicateField { name: String, offset: usize },

    /// Brackets are nested deeper than the parser allows
    #[error("Propex syntax error at {offset}: nesting exceeds the limit of {limit}")]
    TooDeep { limit: usize, offset: usize },
}

impl PropexError {
    /// Get error code for categorization
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "PROPEX:EMPTY",
            Self::UnexpectedRoot { .. } => "PROPEX:ROOT",
            Self::EmptyFieldName { .. } => "PROPEX:EMPTY_FIELD",
            Self::Unclosed { .. } => "PROPEX:UNCLOSED",
            Self::Unexpected { .. } => "PROPEX:UNEXPECTED",
            Self::TrailingInput { .. } => "PROPEX:TRAILING",
            Self::DuplicateField { .. } => "PROPEX:DUPLICATE_FIELD",
            Self::TooDeep { .. } => "PROPEX:TOO_DEEP",
        }
    }

    /// Byte offset in the source where the error was detected.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::UnexpectedRoot { offset, .. }
            | Self::EmptyFieldName { offset }
            | Self::Unclosed { offset, .. }
            | Self::Unexpected { offset, .. }
            | Self::TrailingInput { offset }
            | Self::DuplicateField { offset, .. }
            | Self::TooDeep { offset, .. } => Some(*offset),
        }
    }
}
