//! Per-row record sessions
//!
//! A [`RecordSession`] binds one worksheet row and runs typed field
//! extractions against it. Each extraction resolves the raw cell value,
//! delegates to the coercion engine, and on failure appends one
//! [`ValidationError`] tagged with the cell's address. Data-quality problems
//! never abort the session; after all fields are extracted the caller
//! inspects [`RecordSession::is_valid`] and [`RecordSession::errors`].
//!
//! Sessions are single-row and single-threaded: create one per row, drop it
//! when the row is done. The error list only grows while extracting, and
//! validity is simply its emptiness.

use crate::access::SheetAccess;
use crate::style::StyleOptions;
use chrono::{NaiveDateTime, NaiveTime};
use rowbind_core::{CellRange, CoerceError, Coercer, Field, RawValue, TextRules};
use rust_decimal::Decimal;
use std::fmt;

/// One recorded data-quality failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Cell reference the failure belongs to, when known
    pub address: Option<String>,
    /// The failure message
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            Some(addr) => write!(f, "[{}] {}", addr, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Write-path options for [`RecordSession::set_value_with`]
#[derive(Debug, Clone, Default)]
pub struct CellWrite {
    /// Enable or disable text wrapping on the written cell
    pub wrap_text: Option<bool>,
    /// Number format to apply to the written cell
    pub number_format: Option<String>,
}

impl CellWrite {
    /// No styling alongside the value
    pub fn new() -> Self {
        Self::default()
    }

    /// Set text wrapping
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = Some(wrap);
        self
    }

    /// Set the number format
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = Some(format.into());
        self
    }
}

/// A validation session bound to one worksheet row
pub struct RecordSession<'a, S: SheetAccess> {
    sheet: &'a mut S,
    row: u32,
    coercer: Coercer,
    include_sheet_name: bool,
    errors: Vec<ValidationError>,
}

impl<'a, S: SheetAccess> RecordSession<'a, S> {
    /// Bind a session to `row` (0-based) of `sheet`
    ///
    /// Error addresses are sheet-qualified by default; see
    /// [`Self::include_sheet_name`].
    pub fn new(sheet: &'a mut S, row: u32) -> Self {
        Self {
            sheet,
            row,
            coercer: Coercer::new(),
            include_sheet_name: true,
            errors: Vec::new(),
        }
    }

    /// Use a configured coercion engine instead of the default
    pub fn with_coercer(mut self, coercer: Coercer) -> Self {
        self.coercer = coercer;
        self
    }

    /// Control whether error addresses carry the sheet name
    pub fn include_sheet_name(mut self, include: bool) -> Self {
        self.include_sheet_name = include;
        self
    }

    /// The bound row index (0-based)
    pub fn row(&self) -> u32 {
        self.row
    }

    /// True iff no errors have accumulated
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Formatted error messages, in the order they were recorded
    ///
    /// Format is `[{address}] {message}`, or the bare message when no cell
    /// context exists.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// The recorded errors with their structure intact
    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consume the session, keeping the accumulated errors
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Record a failure against a cell of the bound row
    pub fn add_error(&mut self, column: u16, message: impl fmt::Display) {
        let address = if self.include_sheet_name {
            self.sheet.full_address(self.row, column)
        } else {
            self.sheet.address(self.row, column)
        };
        self.errors.push(ValidationError {
            address: Some(address),
            message: message.to_string(),
        });
    }

    /// Record a failure with no cell context
    pub fn add_row_error(&mut self, message: impl fmt::Display) {
        self.errors.push(ValidationError {
            address: None,
            message: message.to_string(),
        });
    }

    fn raw(&self, column: u16) -> RawValue {
        self.sheet.value(self.row, column)
    }

    fn record<T>(
        &mut self,
        column: u16,
        result: std::result::Result<Option<T>, CoerceError>,
    ) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(error) => {
                self.add_error(column, error);
                None
            }
        }
    }

    /// Extract a string field
    ///
    /// On a length-constraint violation the error is recorded and the
    /// offending text is still returned, so callers can show what was there.
    pub fn get_string(&mut self, field: &Field, rules: &TextRules) -> Option<String> {
        let raw = self.raw(field.column);
        let outcome = self.coercer.string(&raw, field, rules);
        if let Some(error) = outcome.error {
            self.add_error(field.column, error);
        }
        outcome.value
    }

    /// Extract an email-address field
    ///
    /// String extraction plus a format check; a present but malformed
    /// address records one error and is still returned.
    pub fn get_email(&mut self, field: &Field) -> Option<String> {
        let raw = self.raw(field.column);
        let outcome = self.coercer.email(&raw, field);
        if let Some(error) = outcome.error {
            self.add_error(field.column, error);
        }
        outcome.value
    }

    /// Extract a 16-bit integer field
    pub fn get_i16(&mut self, field: &Field) -> Option<i16> {
        let result = self.coercer.int16(&self.raw(field.column), field);
        self.record(field.column, result)
    }

    /// Extract a 32-bit integer field
    pub fn get_i32(&mut self, field: &Field) -> Option<i32> {
        let result = self.coercer.int32(&self.raw(field.column), field);
        self.record(field.column, result)
    }

    /// Extract a 64-bit integer field
    pub fn get_i64(&mut self, field: &Field) -> Option<i64> {
        let result = self.coercer.int64(&self.raw(field.column), field);
        self.record(field.column, result)
    }

    /// Extract a 64-bit float field
    pub fn get_f64(&mut self, field: &Field) -> Option<f64> {
        let result = self.coercer.float64(&self.raw(field.column), field);
        self.record(field.column, result)
    }

    /// Extract a decimal field
    pub fn get_decimal(&mut self, field: &Field) -> Option<Decimal> {
        let result = self.coercer.decimal(&self.raw(field.column), field);
        self.record(field.column, result)
    }

    /// Extract a date/time field, with serial-date fallback
    pub fn get_datetime(&mut self, field: &Field) -> Option<NaiveDateTime> {
        let result = self.coercer.datetime(&self.raw(field.column), field);
        self.record(field.column, result)
    }

    /// Extract a time-of-day field
    pub fn get_time(&mut self, field: &Field) -> Option<NaiveTime> {
        let result = self.coercer.time(&self.raw(field.column), field);
        self.record(field.column, result)
    }

    /// Extract a boolean field
    pub fn get_bool(&mut self, field: &Field) -> Option<bool> {
        let result = self.coercer.boolean(&self.raw(field.column), field);
        self.record(field.column, result)
    }

    /// Extract a month-number field (1-12, literal or month name)
    pub fn get_month(&mut self, field: &Field) -> Option<u32> {
        let result = self.coercer.month(&self.raw(field.column), field);
        self.record(field.column, result)
    }

    /// Write a value into a cell of the bound row
    pub fn set_value<V: Into<RawValue>>(&mut self, column: u16, value: V) {
        self.sheet.set_value(self.row, column, value.into());
    }

    /// Write a value and apply wrap-text / number-format styling
    pub fn set_value_with<V: Into<RawValue>>(&mut self, column: u16, value: V, write: &CellWrite) {
        self.sheet.set_value(self.row, column, value.into());

        if let Some(wrap) = write.wrap_text {
            let range = CellRange::single(rowbind_core::CellAddress::new(self.row, column));
            self.sheet
                .apply_style(range, &StyleOptions::new().wrap_text(wrap));
        }

        if let Some(format) = &write.number_format {
            self.sheet.set_number_format(self.row, column, format);
        }
    }

    /// Apply styling to one cell of the bound row
    pub fn apply_style(&mut self, column: u16, options: &StyleOptions) {
        let range = CellRange::single(rowbind_core::CellAddress::new(self.row, column));
        self.sheet.apply_style(range, options);
    }

    /// Apply styling to a column span of the bound row
    pub fn apply_style_span(&mut self, col_from: u16, col_to: u16, options: &StyleOptions) {
        let range = CellRange::row_span(self.row, col_from, col_to);
        self.sheet.apply_style(range, options);
    }
}

/// A typed record extracted from one row
///
/// Concrete record types decide what makes their row blank; there is no
/// universal rule (a common choice is "all mandatory columns empty").
pub trait Record {
    /// Whether the bound row represents a blank/absent record
    fn is_empty(&self) -> bool;
}
