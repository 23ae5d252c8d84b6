//! # rowbind-core
//!
//! Cell value model and field coercion engine for the rowbind library.
//!
//! This crate is the pure half of rowbind: it knows nothing about any
//! spreadsheet backend. It provides:
//! - [`RawValue`] - Untyped cell values as backends hand them over
//! - [`CellAddress`] and [`CellRange`] - A1-style cell addressing
//! - [`Coercer`] - Converts raw values into typed fields with explicit
//!   success/failure outcomes
//! - [`MonthNames`] - Injected locale month-name tables
//! - Serial date conversion for the 1900 and 1904 date systems
//!
//! ## Example
//!
//! ```rust
//! use rowbind_core::{Coercer, Field, RawValue};
//!
//! let coercer = Coercer::new();
//! let field = Field::required(0, "Start Month");
//!
//! let month = coercer.month(&RawValue::text("March"), &field).unwrap();
//! assert_eq!(month, Some(3));
//! ```

pub mod address;
pub mod coerce;
pub mod error;
pub mod field;
pub mod months;
pub mod serial;
pub mod value;

// Re-exports for convenience
pub use address::{CellAddress, CellRange};
pub use coerce::{CoerceResult, Coercer, TextOutcome};
pub use error::{CoerceError, Error, Result};
pub use field::{Field, TextRules};
pub use months::MonthNames;
pub use serial::{datetime_from_serial, time_from_serial, DateSystem};
pub use value::RawValue;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
