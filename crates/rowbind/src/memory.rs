//! In-memory reference backend
//!
//! [`MemorySheet`] and [`MemoryWorkbook`] implement the collaborator traits
//! with plain maps. They back the crate's tests and work as a lightweight
//! standalone backend when no real spreadsheet engine is wired in.

use crate::access::{SheetAccess, WorkbookAccess};
use crate::error::{Error, Result};
use crate::style::StyleOptions;
use rowbind_core::{CellRange, RawValue};
use std::collections::BTreeMap;

/// A worksheet held entirely in memory
#[derive(Debug, Default)]
pub struct MemorySheet {
    name: String,
    cells: BTreeMap<(u32, u16), RawValue>,
    styles: BTreeMap<(u32, u16), StyleOptions>,
    number_formats: BTreeMap<(u32, u16), String>,
}

impl MemorySheet {
    /// Create an empty sheet
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Convenience setter accepting anything convertible to a raw value
    pub fn set<V: Into<RawValue>>(&mut self, row: u32, col: u16, value: V) {
        self.set_value(row, col, value.into());
    }

    /// The merged styling applied to a cell so far
    pub fn style_at(&self, row: u32, col: u16) -> StyleOptions {
        self.styles.get(&(row, col)).cloned().unwrap_or_default()
    }

    /// The number format applied to a cell, if any
    pub fn number_format(&self, row: u32, col: u16) -> Option<&str> {
        self.number_formats.get(&(row, col)).map(String::as_str)
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn merge_style(into: &mut StyleOptions, options: &StyleOptions) {
        if let Some(h) = options.horizontal {
            into.horizontal = Some(h);
        }
        if let Some(v) = options.vertical {
            into.vertical = Some(v);
        }
        if let Some(b) = options.bold {
            into.bold = Some(b);
        }
        if let Some(a) = options.auto_fit {
            into.auto_fit = Some(a);
        }
        if let Some(w) = options.effective_wrap_text() {
            into.wrap_text = Some(w);
        }
        if let Some(c) = options.text_color {
            into.text_color = Some(c);
        }
        if let Some(c) = options.background_color {
            into.background_color = Some(c);
        }
        if let Some(c) = options.border_color {
            into.border_color = Some(c);
        }
    }
}

impl SheetAccess for MemorySheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self, row: u32, col: u16) -> RawValue {
        self.cells.get(&(row, col)).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, row: u32, col: u16, value: RawValue) {
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
    }

    fn set_number_format(&mut self, row: u32, col: u16, format: &str) {
        self.number_formats.insert((row, col), format.to_string());
    }

    fn apply_style(&mut self, range: CellRange, options: &StyleOptions) {
        if options.is_empty() {
            return;
        }
        for addr in range.cells() {
            let entry = self.styles.entry((addr.row, addr.col)).or_default();
            Self::merge_style(entry, options);
        }
    }
}

/// A workbook of in-memory sheets
#[derive(Debug, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<MemorySheet>,
    names: BTreeMap<String, String>,
}

impl MemoryWorkbook {
    /// Create an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet, returning its 1-based position
    pub fn add_sheet(&mut self, sheet: MemorySheet) -> usize {
        self.sheets.push(sheet);
        self.sheets.len()
    }

    /// The reference a defined name points at, if the name exists
    pub fn defined_name(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }
}

impl WorkbookAccess for MemoryWorkbook {
    type Sheet = MemorySheet;

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn sheet_by_name(&mut self, name: &str) -> Option<&mut MemorySheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    fn sheet_by_index(&mut self, index: usize) -> Option<&mut MemorySheet> {
        if index == 0 {
            return None;
        }
        self.sheets.get_mut(index - 1)
    }

    fn define_name(&mut self, name: &str, refers_to: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::InvalidName("empty name".into()));
        }
        self.names.insert(name.to_string(), refers_to.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell_reads_as_empty() {
        let sheet = MemorySheet::new("S");
        assert_eq!(sheet.value(5, 5), RawValue::Empty);
        assert_eq!(sheet.text(5, 5), "");
    }

    #[test]
    fn test_set_and_get() {
        let mut sheet = MemorySheet::new("S");
        sheet.set(0, 0, 1.5);
        sheet.set(0, 1, "x");
        assert_eq!(sheet.value(0, 0), RawValue::Number(1.5));
        assert_eq!(sheet.text(0, 1), "x");
        assert_eq!(sheet.cell_count(), 2);

        // Writing Empty clears the cell
        sheet.set(0, 0, RawValue::Empty);
        assert_eq!(sheet.cell_count(), 1);
    }

    #[test]
    fn test_apply_style_merges() {
        let mut sheet = MemorySheet::new("S");
        let range = CellRange::row_span(0, 0, 1);

        sheet.apply_style(range, &StyleOptions::new().bold(true));
        sheet.apply_style(range, &StyleOptions::new().auto_fit(true));

        let style = sheet.style_at(0, 0);
        assert_eq!(style.bold, Some(true));
        assert_eq!(style.auto_fit, Some(true));
        // auto_fit turns wrapping on
        assert_eq!(style.wrap_text, Some(true));
    }

    #[test]
    fn test_empty_options_are_a_noop() {
        let mut sheet = MemorySheet::new("S");
        sheet.apply_style(CellRange::row_span(0, 0, 5), &StyleOptions::new());
        assert_eq!(sheet.style_at(0, 0), StyleOptions::default());
    }

    #[test]
    fn test_workbook_lookup() {
        let mut wb = MemoryWorkbook::new();
        wb.add_sheet(MemorySheet::new("First"));
        wb.add_sheet(MemorySheet::new("Second"));

        assert_eq!(wb.sheet_names(), vec!["First", "Second"]);
        assert!(wb.sheet_by_name("Second").is_some());
        assert!(wb.sheet_by_name("Third").is_none());

        // 1-based indexing
        assert_eq!(wb.sheet_by_index(1).unwrap().name(), "First");
        assert!(wb.sheet_by_index(0).is_none());
        assert!(wb.sheet_by_index(3).is_none());
    }

    #[test]
    fn test_defined_names() {
        let mut wb = MemoryWorkbook::new();
        wb.define_name("Months", "Lists!A1:A12").unwrap();
        assert_eq!(wb.defined_name("Months"), Some("Lists!A1:A12"));
        assert!(wb.define_name("  ", "X!A1").is_err());
    }
}
