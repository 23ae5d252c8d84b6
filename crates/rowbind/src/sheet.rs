//! Worksheet binding glue
//!
//! Lookup-by-name-or-index, header-row validation, and thin styling
//! passthroughs for callers working sheet-wide rather than through a
//! record session. Failures here are
//! precondition errors that abort the calling operation, unlike the
//! deferred per-field errors a record session collects.

use crate::access::{SheetAccess, WorkbookAccess};
use crate::error::{Error, Result};
use crate::style::StyleOptions;
use rowbind_core::{CellAddress, CellRange};
use tracing::debug;

/// Resolve a sheet by name
pub fn bind_sheet_by_name<'a, W: WorkbookAccess>(
    workbook: &'a mut W,
    name: &str,
) -> Result<&'a mut W::Sheet> {
    match workbook.sheet_by_name(name) {
        Some(sheet) => {
            debug!("Bound sheet '{name}'");
            Ok(sheet)
        }
        None => Err(Error::SheetNotFound(name.to_string())),
    }
}

/// Resolve a sheet by 1-based position
pub fn bind_sheet_by_index<W: WorkbookAccess>(
    workbook: &mut W,
    index: usize,
) -> Result<&mut W::Sheet> {
    match workbook.sheet_by_index(index) {
        Some(sheet) => {
            debug!("Bound sheet #{index} ('{}')", sheet.name());
            Ok(sheet)
        }
        None => Err(Error::SheetIndexNotFound(index)),
    }
}

/// Check that a header row matches the expected column titles
///
/// Each expected header is compared case-insensitively (and
/// whitespace-trimmed) against the cell text at `(row, col_from + i)`. Every
/// mismatch is collected, so the error names all missing headers with their
/// addresses at once.
pub fn validate_headers<S: SheetAccess>(
    sheet: &S,
    headers: &[&str],
    row: u32,
    col_from: u16,
) -> Result<()> {
    let mut missing = Vec::new();

    for (i, header) in headers.iter().enumerate() {
        let col = col_from + i as u16;
        let text = sheet.text(row, col);
        if !text.trim().eq_ignore_ascii_case(header.trim()) {
            missing.push(format!("{} ({})", header, sheet.address(row, col)));
        }
    }

    if missing.is_empty() {
        debug!("Validated {} headers on '{}'", headers.len(), sheet.name());
        Ok(())
    } else {
        Err(Error::HeaderMismatch {
            sheet: sheet.name().to_string(),
            missing,
        })
    }
}

/// Apply styling to a single cell
pub fn apply_cell_style<S: SheetAccess>(sheet: &mut S, row: u32, col: u16, options: &StyleOptions) {
    sheet.apply_style(CellRange::single(CellAddress::new(row, col)), options);
}

/// Apply styling to a rectangular range given by its corner indices
pub fn apply_range_style<S: SheetAccess>(
    sheet: &mut S,
    row_from: u32,
    col_from: u16,
    row_to: u32,
    col_to: u16,
    options: &StyleOptions,
) {
    let range = CellRange::from_indices(row_from, col_from, row_to, col_to);
    sheet.apply_style(range, options);
}

/// Apply styling to a range given in A1 notation ("B2" or "A1:C10")
pub fn apply_range_style_a1<S: SheetAccess>(
    sheet: &mut S,
    range: &str,
    options: &StyleOptions,
) -> Result<()> {
    let range = CellRange::parse(range)?;
    sheet.apply_style(range, options);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemorySheet, MemoryWorkbook};

    fn workbook() -> MemoryWorkbook {
        let mut wb = MemoryWorkbook::new();
        let mut sheet = MemorySheet::new("Roster");
        sheet.set(0, 0, "Name");
        sheet.set(0, 1, "Age");
        sheet.set(0, 2, "Start Date");
        wb.add_sheet(sheet);
        wb
    }

    #[test]
    fn test_bind_by_name() {
        let mut wb = workbook();
        assert!(bind_sheet_by_name(&mut wb, "Roster").is_ok());

        let err = bind_sheet_by_name(&mut wb, "Missing").unwrap_err();
        assert_eq!(err.to_string(), "Sheet not found: Missing");
    }

    #[test]
    fn test_bind_by_index() {
        let mut wb = workbook();
        assert_eq!(bind_sheet_by_index(&mut wb, 1).unwrap().name(), "Roster");

        let err = bind_sheet_by_index(&mut wb, 2).unwrap_err();
        assert_eq!(err.to_string(), "Sheet number 2 not found");
    }

    #[test]
    fn test_validate_headers_ok() {
        let mut wb = workbook();
        let sheet = bind_sheet_by_name(&mut wb, "Roster").unwrap();
        // Case-insensitive, whitespace tolerant
        assert!(validate_headers(sheet, &["name", "AGE", " start date "], 0, 0).is_ok());
    }

    #[test]
    fn test_style_passthroughs() {
        use crate::style::{HorizontalAlignment, StyleOptions};

        let mut sheet = MemorySheet::new("S");

        apply_cell_style(&mut sheet, 0, 0, &StyleOptions::new().bold(true));
        apply_range_style(
            &mut sheet,
            1,
            0,
            1,
            2,
            &StyleOptions::new().horizontal(HorizontalAlignment::Center),
        );
        apply_range_style_a1(&mut sheet, "A3:B3", &StyleOptions::new().auto_fit(true)).unwrap();

        assert_eq!(sheet.style_at(0, 0).bold, Some(true));
        assert_eq!(
            sheet.style_at(1, 1).horizontal,
            Some(HorizontalAlignment::Center)
        );
        assert_eq!(sheet.style_at(2, 0).wrap_text, Some(true));
        assert_eq!(sheet.style_at(2, 2).wrap_text, None);
    }

    #[test]
    fn test_style_range_parse_error_is_hard() {
        let mut sheet = MemorySheet::new("S");
        assert!(apply_range_style_a1(&mut sheet, "nope", &StyleOptions::new().bold(true)).is_err());
    }

    #[test]
    fn test_validate_headers_collects_all_mismatches() {
        let mut wb = workbook();
        let sheet = bind_sheet_by_name(&mut wb, "Roster").unwrap();

        let err = validate_headers(sheet, &["Name", "Salary", "Team"], 0, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "[Roster] Headers not found: Salary (B1), Team (C1)"
        );
    }
}
