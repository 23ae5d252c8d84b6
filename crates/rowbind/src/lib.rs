//! # rowbind
//!
//! Typed row-to-record mapping and validation over spreadsheet backends.
//!
//! rowbind reads spreadsheet rows into strongly-typed fields (strings,
//! integers, decimals, dates, times, booleans, month names), accumulating
//! field-level errors with cell-address context instead of failing fast.
//! It never opens workbook files itself; backends plug in through the
//! [`SheetAccess`] and [`WorkbookAccess`] traits.
//!
//! ## Example
//!
//! ```rust
//! use rowbind::{Field, MemorySheet, RecordSession, TextRules};
//!
//! let mut sheet = MemorySheet::new("Roster");
//! sheet.set(1, 0, "Alice");
//! sheet.set(1, 1, 45292.0); // date serial for 2024-01-01
//!
//! let mut session = RecordSession::new(&mut sheet, 1);
//! let name = session.get_string(&Field::required(0, "Name"), &TextRules::none());
//! let hired = session.get_datetime(&Field::required(1, "Hire Date"));
//!
//! assert!(session.is_valid());
//! assert_eq!(name.as_deref(), Some("Alice"));
//! assert!(hired.is_some());
//! ```

pub mod access;
pub mod error;
pub mod memory;
pub mod named_range;
pub mod record;
pub mod sheet;
pub mod style;

// Re-exports for convenience
pub use access::{SheetAccess, WorkbookAccess};
pub use error::{Error, Result};
pub use memory::{MemorySheet, MemoryWorkbook};
pub use named_range::fill_named_range;
pub use record::{CellWrite, Record, RecordSession, ValidationError};
pub use sheet::{
    apply_cell_style, apply_range_style, apply_range_style_a1, bind_sheet_by_index,
    bind_sheet_by_name, validate_headers,
};
pub use style::{Color, HorizontalAlignment, StyleOptions, VerticalAlignment};

// Re-export the coercion layer
pub use rowbind_core::{
    CellAddress, CellRange, CoerceError, Coercer, DateSystem, Field, MonthNames, RawValue,
    TextRules,
};
