//! Calendar dates in a fixed UTC calendar.
//!
//! Dates are stored as `YYYY-MM-DD` text on sets and only parsed when date
//! arithmetic is needed. A date that fails to parse becomes
//! [`CalendarDate::INVALID`], which compares false against everything
//! (itself included), the same way `NaN` behaves for floats.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use std::cmp::Ordering;
use std::fmt;

/// A calendar day, or the invalid sentinel
#[derive(Clone, Copy, Debug)]
pub struct CalendarDate(Option<NaiveDate>);

impl CalendarDate {
    /// The unorderable "not a date" value
    pub const INVALID: CalendarDate = CalendarDate(None);

    /// Build a date from numeric components, invalid when out of range
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        CalendarDate(NaiveDate::from_ymd_opt(year, month, day))
    }

    /// The current UTC calendar day, with any time of day discarded
    pub fn today() -> Self {
        CalendarDate(Some(Utc::now().date_naive()))
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate(Some(date))
    }
}

impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.0, other.0) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            None => f.write_str("Invalid Date"),
        }
    }
}

/// Parse `YYYY-MM-DD`.
///
/// Requires exactly three `-`-separated numeric components, none of them
/// zero. Anything else, including impossible days such as `2023-02-30`,
/// yields [`CalendarDate::INVALID`].
pub fn parse_date(text: &str) -> CalendarDate {
    let parts: Vec<&str> = text.trim().split('-').collect();
    if parts.len() != 3 {
        return CalendarDate::INVALID;
    }

    let year = parts[0].parse::<i32>().ok();
    let month = parts[1].parse::<u32>().ok();
    let day = parts[2].parse::<u32>().ok();

    match (year, month, day) {
        (Some(y), Some(m), Some(d)) if y != 0 && m != 0 && d != 0 => {
            CalendarDate::from_ymd(y, m, d)
        }
        _ => CalendarDate::INVALID,
    }
}

/// Render as zero-padded `YYYY-MM-DD`
pub fn format_date(date: CalendarDate) -> String {
    date.to_string()
}

/// Shift a date by `days` calendar days (negative moves backwards).
///
/// The invalid sentinel stays invalid, as does any result before year 1
/// (which [`parse_date`] cannot read back) or outside chrono's range.
pub fn add_days(date: CalendarDate, days: i64) -> CalendarDate {
    let shifted = date
        .0
        .and_then(|d| Duration::try_days(days).and_then(|delta| d.checked_add_signed(delta)))
        .filter(|d| d.year() >= 1);
    CalendarDate(shifted)
}
