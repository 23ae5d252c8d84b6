//! Field coercion engine
//!
//! Converts one [`RawValue`] into one typed result, given a [`Field`]
//! descriptor. The engine has no spreadsheet dependency; the record session
//! layer resolves cells and feeds raw values in.
//!
//! Every method follows the same contract:
//! - `Ok(Some(v))` — the value coerced successfully;
//! - `Ok(None)` — the field is optional and the cell was blank;
//! - `Err(e)` — exactly one failure (missing required value, malformed
//!   value, or constraint violation). Failures are values, never panics.

use crate::error::CoerceError;
use crate::field::{Field, TextRules};
use crate::months::MonthNames;
use crate::serial::{datetime_from_serial, time_from_serial, DateSystem};
use crate::value::RawValue;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Result of one coercion call
pub type CoerceResult<T> = std::result::Result<Option<T>, CoerceError>;

/// Outcome of a string coercion
///
/// Strings are the one target where a constraint violation still surfaces
/// the offending value: callers get both the error to record and the raw
/// text, so a partially valid row can still be displayed or logged.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOutcome {
    /// The extracted value, when the cell was not blank
    pub value: Option<String>,
    /// The failure to record, if any
    pub error: Option<CoerceError>,
}

impl TextOutcome {
    fn ok(value: Option<String>) -> Self {
        Self { value, error: None }
    }

    fn fail(value: Option<String>, error: CoerceError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }
}

/// The field coercion engine
///
/// Holds the locale and workbook settings coercion depends on: the month-name
/// table, the serial date system, and the affirmative token that boolean
/// columns compare against.
#[derive(Debug, Clone)]
pub struct Coercer {
    months: MonthNames,
    date_system: DateSystem,
    affirmative: String,
}

impl Default for Coercer {
    fn default() -> Self {
        Self {
            months: MonthNames::english(),
            date_system: DateSystem::Excel1900,
            affirmative: "Yes".to_string(),
        }
    }
}

impl Coercer {
    /// Engine with English months, the 1900 date system and "Yes" as the
    /// affirmative token
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different month-name table
    pub fn with_months(mut self, months: MonthNames) -> Self {
        self.months = months;
        self
    }

    /// Use a different serial date system
    pub fn with_date_system(mut self, system: DateSystem) -> Self {
        self.date_system = system;
        self
    }

    /// Use a different affirmative token for boolean columns
    pub fn with_affirmative<S: Into<String>>(mut self, token: S) -> Self {
        self.affirmative = token.into();
        self
    }

    /// The configured serial date system
    pub fn date_system(&self) -> DateSystem {
        self.date_system
    }

    /// Coerce to a string, applying [`TextRules`]
    ///
    /// Length constraints are checked against the untrimmed text; on
    /// violation the outcome carries both the error and the original value.
    /// Trimming only happens when the value passed validation.
    pub fn string(&self, raw: &RawValue, field: &Field, rules: &TextRules) -> TextOutcome {
        let text = raw.to_string();
        if text.trim().is_empty() {
            return if field.required {
                TextOutcome::fail(None, CoerceError::required(&field.description))
            } else {
                TextOutcome::ok(None)
            };
        }

        let length = text.chars().count();

        if let Some(expected) = rules.exact_length {
            if length != expected {
                return TextOutcome::fail(
                    Some(text),
                    CoerceError::ExactLength {
                        field: field.description.clone(),
                        expected,
                        actual: length,
                    },
                );
            }
        }

        if let Some(max) = rules.max_length {
            if length > max {
                return TextOutcome::fail(
                    Some(text),
                    CoerceError::MaxLength {
                        field: field.description.clone(),
                        max,
                        actual: length,
                    },
                );
            }
        }

        let value = if rules.trim {
            text.trim().to_string()
        } else {
            text
        };
        TextOutcome::ok(Some(value))
    }

    /// Coerce to an email-address string
    ///
    /// A plain string coercion followed by a format check; a present value
    /// that is not a well-formed address is surfaced alongside the error,
    /// like any other string constraint violation.
    pub fn email(&self, raw: &RawValue, field: &Field) -> TextOutcome {
        let outcome = self.string(raw, field, &TextRules::none().trimmed());
        if outcome.error.is_some() {
            return outcome;
        }

        match outcome.value {
            Some(value) if !EMAIL_PATTERN.is_match(&value) => TextOutcome::fail(
                Some(value),
                CoerceError::InvalidEmail {
                    field: field.description.clone(),
                },
            ),
            value => TextOutcome::ok(value),
        }
    }

    /// Coerce to a 16-bit integer
    pub fn int16(&self, raw: &RawValue, field: &Field) -> CoerceResult<i16> {
        self.integer(raw, field, |f| CoerceError::InvalidShort { field: f })
    }

    /// Coerce to a 32-bit integer
    pub fn int32(&self, raw: &RawValue, field: &Field) -> CoerceResult<i32> {
        self.integer(raw, field, |f| CoerceError::InvalidInteger { field: f })
    }

    /// Coerce to a 64-bit integer
    pub fn int64(&self, raw: &RawValue, field: &Field) -> CoerceResult<i64> {
        self.integer(raw, field, |f| CoerceError::InvalidLong { field: f })
    }

    fn integer<T>(
        &self,
        raw: &RawValue,
        field: &Field,
        invalid: impl Fn(String) -> CoerceError,
    ) -> CoerceResult<T>
    where
        T: TryFrom<i64> + FromStr,
    {
        if raw.is_blank() {
            return blank(field);
        }

        let narrowed = |n: i64| {
            T::try_from(n)
                .map(Some)
                .map_err(|_| invalid(field.description.clone()))
        };

        match raw {
            RawValue::Number(n) => {
                let rounded = n.round();
                if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
                    return Err(invalid(field.description.clone()));
                }
                narrowed(rounded as i64)
            }
            RawValue::Boolean(b) => narrowed(*b as i64),
            RawValue::Text(s) => s
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| invalid(field.description.clone())),
            RawValue::DateTime(_) => Err(invalid(field.description.clone())),
            RawValue::Empty => blank(field),
        }
    }

    /// Coerce to a 64-bit float
    pub fn float64(&self, raw: &RawValue, field: &Field) -> CoerceResult<f64> {
        if raw.is_blank() {
            return blank(field);
        }

        let invalid = || CoerceError::InvalidNumber {
            field: field.description.clone(),
        };

        match raw {
            RawValue::Number(n) => Ok(Some(*n)),
            RawValue::Boolean(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
            RawValue::Text(s) => s.trim().parse::<f64>().map(Some).map_err(|_| invalid()),
            RawValue::DateTime(_) => Err(invalid()),
            RawValue::Empty => blank(field),
        }
    }

    /// Coerce to a decimal
    pub fn decimal(&self, raw: &RawValue, field: &Field) -> CoerceResult<Decimal> {
        if raw.is_blank() {
            return blank(field);
        }

        let invalid = || CoerceError::InvalidNumber {
            field: field.description.clone(),
        };

        match raw {
            RawValue::Number(n) => Decimal::from_f64_retain(*n).map(Some).ok_or_else(invalid),
            RawValue::Boolean(b) => Ok(Some(if *b { Decimal::ONE } else { Decimal::ZERO })),
            RawValue::Text(s) => Decimal::from_str(s.trim()).map(Some).map_err(|_| invalid()),
            RawValue::DateTime(_) => Err(invalid()),
            RawValue::Empty => blank(field),
        }
    }

    /// Coerce to a date/time
    ///
    /// Text is parsed directly first; text or numbers that fail direct
    /// parsing fall back to serial date conversion. Text consisting only of
    /// hyphens counts as blank.
    pub fn datetime(&self, raw: &RawValue, field: &Field) -> CoerceResult<NaiveDateTime> {
        if raw.is_blank_for_dates() {
            return blank(field);
        }

        let invalid = || CoerceError::InvalidDate {
            field: field.description.clone(),
        };

        match raw {
            RawValue::DateTime(dt) => Ok(Some(*dt)),
            RawValue::Number(n) => datetime_from_serial(*n, self.date_system)
                .map(Some)
                .ok_or_else(invalid),
            RawValue::Text(s) => {
                let s = s.trim();
                if let Some(dt) = parse_datetime_text(s) {
                    return Ok(Some(dt));
                }
                // Serial fallback for numeric text the backend kept as string
                s.parse::<f64>()
                    .ok()
                    .and_then(|serial| datetime_from_serial(serial, self.date_system))
                    .map(Some)
                    .ok_or_else(invalid)
            }
            RawValue::Boolean(_) => Err(invalid()),
            RawValue::Empty => blank(field),
        }
    }

    /// Coerce to a time of day
    ///
    /// Direct time-of-day parsing first, then a full date/time parse keeping
    /// only the time component, then the serial fraction.
    pub fn time(&self, raw: &RawValue, field: &Field) -> CoerceResult<NaiveTime> {
        if raw.is_blank_for_dates() {
            return blank(field);
        }

        let invalid = || CoerceError::InvalidTime {
            field: field.description.clone(),
        };

        match raw {
            RawValue::DateTime(dt) => Ok(Some(dt.time())),
            RawValue::Number(n) => time_from_serial(*n).map(Some).ok_or_else(invalid),
            RawValue::Text(s) => {
                let s = s.trim();
                if let Some(t) = parse_time_text(s) {
                    return Ok(Some(t));
                }
                if let Some(dt) = parse_datetime_text(s) {
                    return Ok(Some(dt.time()));
                }
                s.parse::<f64>()
                    .ok()
                    .and_then(time_from_serial)
                    .map(Some)
                    .ok_or_else(invalid)
            }
            RawValue::Boolean(_) => Err(invalid()),
            RawValue::Empty => blank(field),
        }
    }

    /// Coerce to a boolean
    ///
    /// Native booleans pass through. Any other present value is compared
    /// case-insensitively against the affirmative token; a mismatch is
    /// `false`, never an error. Only a missing required cell fails.
    pub fn boolean(&self, raw: &RawValue, field: &Field) -> CoerceResult<bool> {
        match raw {
            RawValue::Empty => blank(field),
            RawValue::Boolean(b) => Ok(Some(*b)),
            other => {
                let text = other.to_string();
                Ok(Some(
                    text.trim().to_lowercase() == self.affirmative.to_lowercase(),
                ))
            }
        }
    }

    /// Coerce to a month number (1-12)
    ///
    /// Accepts either a literal integer in range, or a month name resolved
    /// against the configured table. Out-of-range numbers and unknown names
    /// are month-mismatch errors.
    pub fn month(&self, raw: &RawValue, field: &Field) -> CoerceResult<u32> {
        if raw.is_blank() {
            return blank(field);
        }

        let invalid = || CoerceError::InvalidMonth {
            field: field.description.clone(),
        };

        let text = raw.to_string();
        let text = text.trim();

        if let Ok(n) = text.parse::<i64>() {
            return if (1..=12).contains(&n) {
                Ok(Some(n as u32))
            } else {
                Err(invalid())
            };
        }

        // Numeric cells render as e.g. "3", but guard against fractions
        if let RawValue::Number(n) = raw {
            let rounded = n.round();
            return if (1.0..=12.0).contains(&rounded) && (n - rounded).abs() < f64::EPSILON {
                Ok(Some(rounded as u32))
            } else {
                Err(invalid())
            };
        }

        self.months.resolve(text).map(Some).ok_or_else(invalid)
    }
}

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

fn blank<T>(field: &Field) -> CoerceResult<T> {
    if field.required {
        Err(CoerceError::required(&field.description))
    } else {
        Ok(None)
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

fn parse_datetime_text(s: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

fn parse_time_text(s: &str) -> Option<NaiveTime> {
    for format in &["%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(s, format) {
            return Some(t);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(desc: &str) -> Field {
        Field::required(0, desc)
    }

    fn optional(desc: &str) -> Field {
        Field::optional(0, desc)
    }

    #[test]
    fn test_string_required_blank() {
        let c = Coercer::new();
        let outcome = c.string(&RawValue::Empty, &required("Name"), &TextRules::none());
        assert_eq!(outcome.value, None);
        assert_eq!(outcome.error, Some(CoerceError::required("Name")));
    }

    #[test]
    fn test_string_optional_blank() {
        let c = Coercer::new();
        let outcome = c.string(&RawValue::text("   "), &optional("Notes"), &TextRules::none());
        assert_eq!(outcome.value, None);
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn test_string_exact_length_violation_keeps_value() {
        let c = Coercer::new();
        let rules = TextRules::none().exact_length(5).trimmed();
        let outcome = c.string(&RawValue::text("abcd"), &required("Code"), &rules);
        // The offending value is surfaced untrimmed alongside the error
        assert_eq!(outcome.value, Some("abcd".to_string()));
        assert_eq!(
            outcome.error,
            Some(CoerceError::ExactLength {
                field: "Code".into(),
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn test_string_max_length() {
        let c = Coercer::new();
        let rules = TextRules::none().max_length(3);
        let outcome = c.string(&RawValue::text("abcdef"), &required("Tag"), &rules);
        assert!(matches!(
            outcome.error,
            Some(CoerceError::MaxLength { max: 3, actual: 6, .. })
        ));

        let outcome = c.string(&RawValue::text("ab"), &required("Tag"), &rules);
        assert_eq!(outcome.value, Some("ab".to_string()));
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn test_string_trim() {
        let c = Coercer::new();
        let outcome = c.string(
            &RawValue::text("  hi  "),
            &required("Name"),
            &TextRules::none().trimmed(),
        );
        assert_eq!(outcome.value, Some("hi".to_string()));
    }

    #[test]
    fn test_email_valid() {
        let c = Coercer::new();
        let outcome = c.email(&RawValue::text(" ana@example.com "), &required("Email"));
        assert_eq!(outcome.value, Some("ana@example.com".to_string()));
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn test_email_invalid_format_keeps_value() {
        let c = Coercer::new();
        for bad in ["not-an-email", "a@b", "a b@example.com", "@example.com"] {
            let outcome = c.email(&RawValue::text(bad), &required("Email"));
            assert_eq!(outcome.value, Some(bad.to_string()), "{bad}");
            assert_eq!(
                outcome.error,
                Some(CoerceError::InvalidEmail { field: "Email".into() }),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_email_blank() {
        let c = Coercer::new();

        let outcome = c.email(&RawValue::Empty, &required("Email"));
        assert_eq!(outcome.value, None);
        assert_eq!(outcome.error, Some(CoerceError::required("Email")));

        let outcome = c.email(&RawValue::Empty, &optional("Email"));
        assert_eq!(outcome.value, None);
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn test_int32_from_number_and_text() {
        let c = Coercer::new();
        let f = required("Count");
        assert_eq!(c.int32(&RawValue::Number(42.0), &f).unwrap(), Some(42));
        assert_eq!(c.int32(&RawValue::text("42"), &f).unwrap(), Some(42));
        assert_eq!(c.int32(&RawValue::text(" 7 "), &f).unwrap(), Some(7));
    }

    #[test]
    fn test_int32_invalid_text() {
        let c = Coercer::new();
        let err = c.int32(&RawValue::text("abc"), &required("Count")).unwrap_err();
        assert_eq!(err, CoerceError::InvalidInteger { field: "Count".into() });
    }

    #[test]
    fn test_integer_width_specific_messages() {
        let c = Coercer::new();
        let f = required("N");
        assert!(matches!(
            c.int16(&RawValue::text("99999"), &f).unwrap_err(),
            CoerceError::InvalidShort { .. }
        ));
        assert!(matches!(
            c.int64(&RawValue::text("x"), &f).unwrap_err(),
            CoerceError::InvalidLong { .. }
        ));
    }

    #[test]
    fn test_integer_optional_blank() {
        let c = Coercer::new();
        assert_eq!(c.int32(&RawValue::Empty, &optional("Count")).unwrap(), None);
        assert_eq!(
            c.int32(&RawValue::Empty, &required("Count")).unwrap_err(),
            CoerceError::required("Count")
        );
    }

    #[test]
    fn test_float_and_decimal() {
        let c = Coercer::new();
        let f = required("Amount");
        assert_eq!(c.float64(&RawValue::Number(2.5), &f).unwrap(), Some(2.5));
        assert_eq!(c.float64(&RawValue::text("2.5"), &f).unwrap(), Some(2.5));
        assert!(matches!(
            c.float64(&RawValue::text("x"), &f).unwrap_err(),
            CoerceError::InvalidNumber { .. }
        ));

        assert_eq!(
            c.decimal(&RawValue::text("19.99"), &f).unwrap(),
            Some(Decimal::from_str("19.99").unwrap())
        );
        assert!(matches!(
            c.decimal(&RawValue::text("19,99"), &f).unwrap_err(),
            CoerceError::InvalidNumber { .. }
        ));
    }

    #[test]
    fn test_datetime_direct_parse() {
        let c = Coercer::new();
        let f = required("Date");
        let dt = c.datetime(&RawValue::text("2024-03-15"), &f).unwrap().unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        let dt = c
            .datetime(&RawValue::text("15/03/2024 08:30"), &f)
            .unwrap()
            .unwrap();
        assert_eq!(dt.time(), NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    }

    #[test]
    fn test_datetime_serial_fallback() {
        let c = Coercer::new();
        let f = required("Date");

        // Numeric cell: direct parse is impossible, serial conversion applies
        let dt = c.datetime(&RawValue::Number(45292.0), &f).unwrap().unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        // Numeric text rejected by the date formats falls back the same way
        let dt = c.datetime(&RawValue::text("45292"), &f).unwrap().unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_datetime_hyphen_only_is_blank() {
        let c = Coercer::new();
        assert_eq!(c.datetime(&RawValue::text("-"), &optional("Date")).unwrap(), None);
        assert_eq!(
            c.datetime(&RawValue::text("--"), &required("Date")).unwrap_err(),
            CoerceError::required("Date")
        );
    }

    #[test]
    fn test_datetime_invalid() {
        let c = Coercer::new();
        assert!(matches!(
            c.datetime(&RawValue::text("not a date"), &required("Date"))
                .unwrap_err(),
            CoerceError::InvalidDate { .. }
        ));
    }

    #[test]
    fn test_time_direct_and_fallbacks() {
        let c = Coercer::new();
        let f = required("Start");

        let t = c.time(&RawValue::text("08:30"), &f).unwrap().unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(8, 30, 0).unwrap());

        // Full date/time text keeps only the time component
        let t = c
            .time(&RawValue::text("2024-03-15 08:30:15"), &f)
            .unwrap()
            .unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(8, 30, 15).unwrap());

        // Serial fraction of a day
        let t = c.time(&RawValue::Number(0.5), &f).unwrap().unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(12, 0, 0).unwrap());

        assert!(matches!(
            c.time(&RawValue::text("soon"), &f).unwrap_err(),
            CoerceError::InvalidTime { .. }
        ));
    }

    #[test]
    fn test_boolean_token_comparison() {
        let c = Coercer::new();
        let f = required("Active");
        assert_eq!(c.boolean(&RawValue::text("YES"), &f).unwrap(), Some(true));
        assert_eq!(c.boolean(&RawValue::text("yes"), &f).unwrap(), Some(true));
        assert_eq!(c.boolean(&RawValue::text("no"), &f).unwrap(), Some(false));
        // Present but non-boolean never errors
        assert_eq!(c.boolean(&RawValue::text("maybe"), &f).unwrap(), Some(false));
        assert_eq!(c.boolean(&RawValue::Number(1.0), &f).unwrap(), Some(false));
    }

    #[test]
    fn test_boolean_native_passthrough() {
        // Native booleans bypass the token comparison entirely
        let c = Coercer::new().with_affirmative("oui");
        let f = required("Active");
        assert_eq!(c.boolean(&RawValue::Boolean(true), &f).unwrap(), Some(true));
        assert_eq!(c.boolean(&RawValue::Boolean(false), &f).unwrap(), Some(false));
        assert_eq!(c.boolean(&RawValue::text("Oui"), &f).unwrap(), Some(true));
    }

    #[test]
    fn test_boolean_required_blank() {
        let c = Coercer::new();
        assert_eq!(
            c.boolean(&RawValue::Empty, &required("Active")).unwrap_err(),
            CoerceError::required("Active")
        );
        assert_eq!(c.boolean(&RawValue::Empty, &optional("Active")).unwrap(), None);
    }

    #[test]
    fn test_month_literal_and_name() {
        let c = Coercer::new();
        let f = required("Month");
        assert_eq!(c.month(&RawValue::text("3"), &f).unwrap(), Some(3));
        assert_eq!(c.month(&RawValue::text("March"), &f).unwrap(), Some(3));
        assert_eq!(c.month(&RawValue::text("march"), &f).unwrap(), Some(3));
        assert_eq!(c.month(&RawValue::Number(12.0), &f).unwrap(), Some(12));
    }

    #[test]
    fn test_month_out_of_range() {
        let c = Coercer::new();
        let f = required("Month");
        assert_eq!(
            c.month(&RawValue::text("13"), &f).unwrap_err(),
            CoerceError::InvalidMonth { field: "Month".into() }
        );
        assert_eq!(
            c.month(&RawValue::text("0"), &f).unwrap_err(),
            CoerceError::InvalidMonth { field: "Month".into() }
        );
        assert!(c.month(&RawValue::text("Marchember"), &f).is_err());
    }

    #[test]
    fn test_month_injected_locale() {
        fn arr(names: [&str; 12]) -> [String; 12] {
            names.map(String::from)
        }

        let c = Coercer::new().with_months(MonthNames::new(arr([
            "enero",
            "febrero",
            "marzo",
            "abril",
            "mayo",
            "junio",
            "julio",
            "agosto",
            "septiembre",
            "octubre",
            "noviembre",
            "diciembre",
        ])));
        let f = required("Mes");
        assert_eq!(c.month(&RawValue::text("Marzo"), &f).unwrap(), Some(3));
        assert!(c.month(&RawValue::text("March"), &f).is_err());
    }
}
