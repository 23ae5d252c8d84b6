//! Error types for rowbind-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors in the core types
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u16, u16),
}

/// A single field-coercion failure
///
/// These are data-quality outcomes, not faults: the record session records
/// them against a cell address and carries on with the next field. Message
/// text names the field by its human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// Required field is blank
    #[error("Required: {field}")]
    Required { field: String },

    /// Value cannot be converted to an integer
    #[error("{field}: not a valid integer")]
    InvalidInteger { field: String },

    /// Value cannot be converted to a 16-bit integer
    #[error("{field}: not a valid short integer")]
    InvalidShort { field: String },

    /// Value cannot be converted to a 64-bit integer
    #[error("{field}: not a valid long integer")]
    InvalidLong { field: String },

    /// Value cannot be converted to a number
    #[error("{field}: not a valid number")]
    InvalidNumber { field: String },

    /// Value cannot be converted to a date
    #[error("{field}: not a valid date")]
    InvalidDate { field: String },

    /// Value cannot be converted to a time of day
    #[error("{field}: not a valid time")]
    InvalidTime { field: String },

    /// Value is neither a month number 1-12 nor a known month name
    #[error("{field} is not a valid month")]
    InvalidMonth { field: String },

    /// Value is not a well-formed email address
    #[error("{field}: not a valid email address")]
    InvalidEmail { field: String },

    /// Text exceeds the maximum length constraint
    #[error("{field}: must be at most {max} characters (got {actual})")]
    MaxLength {
        field: String,
        max: usize,
        actual: usize,
    },

    /// Text does not match the exact length constraint
    #[error("{field}: must be exactly {expected} characters (got {actual})")]
    ExactLength {
        field: String,
        expected: usize,
        actual: usize,
    },
}

impl CoerceError {
    /// Create a required-field error
    pub fn required<S: Into<String>>(field: S) -> Self {
        CoerceError::Required {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_error_messages() {
        assert_eq!(
            CoerceError::required("Name").to_string(),
            "Required: Name"
        );
        assert_eq!(
            CoerceError::InvalidMonth {
                field: "Start Month".into()
            }
            .to_string(),
            "Start Month is not a valid month"
        );
        assert_eq!(
            CoerceError::ExactLength {
                field: "Code".into(),
                expected: 5,
                actual: 4
            }
            .to_string(),
            "Code: must be exactly 5 characters (got 4)"
        );
    }
}
