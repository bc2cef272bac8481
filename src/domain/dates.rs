//! Boundary normalization for dates and quantities, plus the date-range
//! predicate shared by listings and reports.
//!
//! Raw strings (form inputs, CSV cells) are normalized once at the
//! boundary; everything downstream compares typed `NaiveDate` values at
//! day granularity.

use chrono::{Datelike, NaiveDate};

/// Normalize a raw date string to a calendar date.
///
/// Accepts `YYYY-MM-DD`, or any longer string whose first ten characters
/// form a valid `YYYY-MM-DD` (so RFC 3339 timestamps pass through).
/// Empty or unparsable input yields `None`.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Format a calendar date back to its canonical `YYYY-MM-DD` form, with
/// the empty string standing for "no date".
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Inclusive date-range predicate.
///
/// With neither bound supplied every record matches, dateless ones
/// included. As soon as a bound is present a dateless record can never be
/// "in range".
pub fn in_range(date: Option<NaiveDate>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    in_range_strict(date, from, to)
}

/// Like [`in_range`] but without the no-bound pass-through: a dateless
/// record never matches, even with no bounds supplied. Reports use this
/// variant; see `ReportService`.
pub fn in_range_strict(
    date: Option<NaiveDate>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> bool {
    let Some(d) = date else {
        return false;
    };
    if let Some(f) = from {
        if d < f {
            return false;
        }
    }
    if let Some(t) = to {
        if d > t {
            return false;
        }
    }
    true
}

/// Signed calendar-month difference from `today` to `exp`.
///
/// Day-of-month is ignored: an expiry on the 1st and on the 28th of the
/// same month give the same result. This is the observable contract of
/// the expiring-soon window, not an approximation to fix.
pub fn month_diff(exp: NaiveDate, today: NaiveDate) -> i64 {
    (exp.year() as i64 - today.year() as i64) * 12 + (exp.month() as i64 - today.month() as i64)
}

/// Coerce a raw quantity string to an integer.
///
/// Unparsable input counts as zero; fractional input truncates. Negative
/// values pass through unrejected (validation is the caller's concern).
pub fn parse_quantity(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    raw.parse::<i64>()
        .or_else(|_| raw.parse::<f64>().map(|f| f as i64))
        .unwrap_or(0)
}
