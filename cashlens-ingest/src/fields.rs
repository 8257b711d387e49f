//! Field conversion for statement rows: dates and money amounts.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static SLASH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})$").expect("slash date regex")
});
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("iso date regex"));
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("leading number regex")
});

/// Shapes tried when neither explicit pattern matches
const FALLBACK_DATE_FORMATS: [&str; 7] = [
    "%Y/%m/%d",
    "%Y-%m-%d",
    "%m-%d-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Timestamp shapes; only the calendar date is kept
const FALLBACK_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// chrono reads `%Y` from as few as one digit, so `1/5/25` would otherwise
/// come back as year 1
const MIN_FALLBACK_YEAR: i32 = 1000;

/// Two-digit years below this are 20xx, the rest 19xx
const TWO_DIGIT_YEAR_PIVOT: i32 = 50;

/// Parse a statement date.
///
/// `M/D/YYYY` (or `M/D/YY`) and `YYYY-MM-DD` are the supported shapes.
/// Anything else goes through a lenient fallback, so some other common
/// exports still resolve. A matching shape with an impossible day
/// (e.g. `2/30/2025`) is rejected.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = SLASH_DATE.captures(s) {
        let m: u32 = caps[1].parse().ok()?;
        let d: u32 = caps[2].parse().ok()?;
        let mut y: i32 = caps[3].parse().ok()?;
        if caps[3].len() == 2 {
            y += if y < TWO_DIGIT_YEAR_PIVOT { 2000 } else { 1900 };
        }
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    if let Some(caps) = ISO_DATE.captures(s) {
        let y: i32 = caps[1].parse().ok()?;
        let m: u32 = caps[2].parse().ok()?;
        let d: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    parse_date_fallback(s).filter(|d| d.year() >= MIN_FALLBACK_YEAR)
}

fn parse_date_fallback(s: &str) -> Option<NaiveDate> {
    for fmt in FALLBACK_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // Timestamps: keep the calendar date as written
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// Parse a money amount like `$1,200.00`, ` -125.50 ` or `3500`.
///
/// Dollar signs, thousands separators and whitespace are removed, then the
/// leading decimal number is converted and any trailing text (`USD`, `CR`)
/// is ignored. Non-finite results are rejected.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    let number = LEADING_NUMBER.find(&cleaned)?;
    number.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}
