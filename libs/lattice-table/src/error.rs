//! # Table Errors
//!
//! Error types for element-table loading.

use thiserror::Error;

/// Result type for table operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while reading an element table.
///
/// Row numbers are 1-based line numbers in the source text, so the header
/// is row 1 and the first element is row 2.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The row has fewer fields than the fixed layout requires.
    #[error("row {row}: expected {expected} fields, found {found}")]
    FieldCount {
        /// Line number of the row.
        row: usize,
        /// Number of comma-separated fields found.
        found: usize,
        /// Number of fields required.
        expected: usize,
    },

    /// A numeric field could not be parsed.
    #[error("row {row}: field '{field}' is not a number: '{value}'")]
    InvalidNumber {
        /// Line number of the row.
        row: usize,
        /// Name of the offending column.
        field: &'static str,
        /// Raw text of the field.
        value: String,
    },

    /// A number is non-finite, or negative where only non-negative values
    /// make sense (lengths, pipe and wiggler dimensions).
    #[error("row {row}: field '{field}' is out of range: {value}")]
    OutOfRange {
        /// Line number of the row.
        row: usize,
        /// Name of the offending column.
        field: &'static str,
        /// Parsed value.
        value: f64,
    },

    /// The element name column is blank.
    #[error("row {row}: element name is empty")]
    EmptyName {
        /// Line number of the row.
        row: usize,
    },

    /// Underlying read failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Creates an invalid number error.
    pub fn invalid_number(row: usize, field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            row,
            field,
            value: value.into(),
        }
    }

    /// Creates an out-of-range error.
    pub fn out_of_range(row: usize, field: &'static str, value: f64) -> Self {
        Self::OutOfRange { row, field, value }
    }

    /// Returns the row the error refers to, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::FieldCount { row, .. }
            | Self::InvalidNumber { row, .. }
            | Self::OutOfRange { row, .. }
            | Self::EmptyName { row } => Some(*row),
            Self::Io(_) => None,
        }
    }
}
