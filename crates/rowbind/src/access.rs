//! Collaborator traits for spreadsheet backends
//!
//! rowbind never opens or saves workbook files. Backends expose cells and
//! styling through these two narrow traits, and everything else in the crate
//! is written against them. [`crate::memory::MemoryWorkbook`] is the
//! in-memory reference implementation.

use crate::error::Result;
use crate::style::StyleOptions;
use rowbind_core::{CellAddress, CellRange, RawValue};

/// Cell-level access to one worksheet
pub trait SheetAccess {
    /// The sheet's display name
    fn name(&self) -> &str;

    /// Get the raw value at (row, col), [`RawValue::Empty`] when absent
    fn value(&self, row: u32, col: u16) -> RawValue;

    /// Get the displayed text at (row, col)
    ///
    /// The default renders the raw value; backends with number formats
    /// should override this with the formatted text.
    fn text(&self, row: u32, col: u16) -> String {
        self.value(row, col).to_string()
    }

    /// Set the value at (row, col)
    fn set_value(&mut self, row: u32, col: u16, value: RawValue);

    /// Set the number format at (row, col)
    fn set_number_format(&mut self, row: u32, col: u16, format: &str);

    /// Apply styling directives to a rectangular range
    ///
    /// Absent options are no-ops; `auto_fit` additionally enables text
    /// wrapping (see [`StyleOptions::effective_wrap_text`]).
    fn apply_style(&mut self, range: CellRange, options: &StyleOptions);

    /// Human-readable cell reference ("B4")
    fn address(&self, row: u32, col: u16) -> String {
        CellAddress::new(row, col).to_a1_string()
    }

    /// Sheet-qualified cell reference ("Sheet1!B4")
    fn full_address(&self, row: u32, col: u16) -> String {
        CellAddress::new(row, col).to_full_string(self.name())
    }
}

/// Workbook-level access: sheet lookup and defined names
pub trait WorkbookAccess {
    /// The sheet type this workbook exposes
    type Sheet: SheetAccess;

    /// Names of all sheets, in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Look up a sheet by name
    fn sheet_by_name(&mut self, name: &str) -> Option<&mut Self::Sheet>;

    /// Look up a sheet by 1-based position
    fn sheet_by_index(&mut self, index: usize) -> Option<&mut Self::Sheet>;

    /// Define (or redefine) a workbook-scoped name pointing at a reference
    /// like "Sheet1!A2:A10"
    fn define_name(&mut self, name: &str, refers_to: &str) -> Result<()>;
}
