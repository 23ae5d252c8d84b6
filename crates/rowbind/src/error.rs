//! Error types for rowbind
//!
//! These are the hard, precondition failures: a collaborator that cannot be
//! resolved or a sheet whose header row does not match. Per-field
//! data-quality problems never surface here; they accumulate inside a
//! [`crate::RecordSession`] instead.

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while binding to a workbook
#[derive(Debug, Error)]
pub enum Error {
    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Sheet not found by 1-based index
    #[error("Sheet number {0} not found")]
    SheetIndexNotFound(usize),

    /// Expected header cells missing or mismatched
    #[error("[{sheet}] Headers not found: {}", .missing.join(", "))]
    HeaderMismatch {
        /// Sheet the headers were checked on
        sheet: String,
        /// Each entry is "{header} ({address})"
        missing: Vec<String>,
    },

    /// Named range could not be defined
    #[error("Invalid named range: {0}")]
    InvalidName(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] rowbind_core::Error),
}
