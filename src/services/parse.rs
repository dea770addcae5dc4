//! Cell parsing shared by validation and cleaning

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::Money;

/// Date formats tried after the preferred format
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y", "%d.%m.%Y", "%m-%d-%Y",
];

/// Date-time formats whose date part is kept
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a date cell, trying `preferred` first
pub fn parse_date(s: &str, preferred: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, preferred) {
        return Some(date);
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|dt| dt.date())
}

/// Parse a currency cell
///
/// Falls back to plain float syntax ("1e5") once thousands separators are
/// stripped.
pub fn parse_amount(s: &str) -> Option<Money> {
    Money::parse(s).ok().or_else(|| {
        let plain: String = s.trim().chars().filter(|c| *c != ',').collect();
        plain.parse::<f64>().ok().and_then(Money::from_f64)
    })
}

/// Parse a plain numeric cell such as a percentage ("20.13" or "20.13%")
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix('%').unwrap_or(s).trim();
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
