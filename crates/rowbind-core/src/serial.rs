//! Spreadsheet serial date conversion
//!
//! Spreadsheets store dates as serial numbers: the integer part counts days
//! from a fixed epoch, the fractional part is the time of day. The 1900 date
//! system carries the historical leap-year bug, where the non-existent day
//! 1900-02-29 occupies serial 60.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Which date system the workbook uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSystem {
    /// 1900 system (serial 1 = 1900-01-01), the usual default
    #[default]
    Excel1900,
    /// 1904 system (serial 0 = 1904-01-01), used by legacy Mac workbooks
    Excel1904,
}

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a serial number to a calendar date/time
///
/// Returns `None` for negative serials or values outside chrono's range.
pub fn datetime_from_serial(serial: f64, system: DateSystem) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let days = serial.trunc() as i64;
    let date = match system {
        DateSystem::Excel1900 => date_from_serial_1900(days)?,
        DateSystem::Excel1904 => {
            let base = NaiveDate::from_ymd_opt(1904, 1, 1)?;
            base.checked_add_signed(Duration::days(days))?
        }
    };

    let time = time_from_fraction(serial.fract())?;
    Some(date.and_time(time))
}

/// Extract a time of day from a serial number's fractional part
pub fn time_from_serial(serial: f64) -> Option<NaiveTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    time_from_fraction(serial.fract())
}

fn time_from_fraction(fraction: f64) -> Option<NaiveTime> {
    let total_seconds = (fraction * SECONDS_PER_DAY).round() as u32;
    // Rounding can land exactly on midnight of the next day
    let total_seconds = total_seconds % 86_400;
    NaiveTime::from_num_seconds_from_midnight_opt(total_seconds, 0)
}

fn date_from_serial_1900(serial: i64) -> Option<NaiveDate> {
    let base = NaiveDate::from_ymd_opt(1899, 12, 31)?;
    // Skip the fictional 1900-02-29 (serial 60); serial 60 itself maps to
    // 1900-02-28, the last real day before the phantom entry.
    let adjusted = if serial >= 60 { serial - 1 } else { serial };
    base.checked_add_signed(Duration::days(adjusted))
}
