//! Raw cell value model

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// An untyped value retrieved from a cell, before coercion
///
/// Spreadsheet backends hand cells over as one of a small set of scalar
/// shapes. Coercion pattern-matches over this enum exhaustively instead of
/// probing an open-ended dynamic type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RawValue {
    /// Empty cell (no value)
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value (all numbers stored as f64, including date serials)
    Number(f64),

    /// String value
    Text(String),

    /// Date/time value already resolved by the backend
    DateTime(NaiveDateTime),
}

impl RawValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        RawValue::Text(s.into())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Empty)
    }

    /// Check if the value is empty, or text that is only whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Blank check used by date and time coercion
    ///
    /// A value whose textual form consists only of hyphen separators and
    /// whitespace (e.g. "-" or "--") counts as blank, matching how empty
    /// date columns are commonly filled in by hand.
    pub fn is_blank_for_dates(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.replace('-', "").trim().is_empty(),
            _ => false,
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Boolean(true) => Some(1.0),
            RawValue::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get the value as a date/time
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            RawValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Empty => "empty",
            RawValue::Boolean(_) => "boolean",
            RawValue::Number(_) => "number",
            RawValue::Text(_) => "text",
            RawValue::DateTime(_) => "datetime",
        }
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Empty
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Empty => write!(f, ""),
            RawValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => write!(f, "{}", s),
            RawValue::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Boolean(b)
    }
}

impl From<i32> for RawValue {
    fn from(n: i32) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::text(s)
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(dt: NaiveDateTime) -> Self {
        RawValue::DateTime(dt)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(d: NaiveDate) -> Self {
        RawValue::DateTime(d.and_time(NaiveTime::MIN))
    }
}
