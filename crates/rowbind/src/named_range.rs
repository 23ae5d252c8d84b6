//! Named-range population
//!
//! Rewrites a lookup column (typically feeding dropdown validation on
//! another sheet) and points a defined name at the freshly written span.

use crate::access::{SheetAccess, WorkbookAccess};
use crate::error::Result;
use crate::sheet::bind_sheet_by_name;
use rowbind_core::{CellAddress, CellRange, RawValue};
use tracing::debug;

/// Rows cleared below the write position before filling
const CLEAR_SPAN: u32 = 10_000;

/// Fill a column with values and define `range_name` over the written span
///
/// The column is cleared from `row_from` downward first, so a shrinking
/// value list does not leave stale entries behind. When `values` is empty
/// the name is left pointing at the single (cleared) starting cell.
pub fn fill_named_range<W, I, V>(
    workbook: &mut W,
    sheet_name: &str,
    range_name: &str,
    column: u16,
    row_from: u32,
    values: I,
) -> Result<()>
where
    W: WorkbookAccess,
    I: IntoIterator<Item = V>,
    V: Into<RawValue>,
{
    let refers_to = {
        let sheet = bind_sheet_by_name(workbook, sheet_name)?;

        for row in row_from..row_from + CLEAR_SPAN {
            sheet.set_value(row, column, RawValue::Empty);
        }

        let mut row = row_from;
        let mut written = 0u32;
        for value in values {
            sheet.set_value(row, column, value.into());
            row += 1;
            written += 1;
        }

        let last_row = if written == 0 { row_from } else { row - 1 };
        let range = CellRange::new(
            CellAddress::new(row_from, column),
            CellAddress::new(last_row, column),
        );
        debug!("Filled {written} values into '{range_name}' ({})", range);
        range.to_full_string(sheet.name())
    };

    workbook.define_name(range_name, &refers_to)
}
