//! Parsing and formatting helpers shared by the forms.
//!
//! Number formatting is locale independent: salaries always use `.` as the
//! decimal separator and exactly two fraction digits.

use std::fmt::Write as _;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

/// Display pattern used by date pickers unless configured otherwise.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// `true` if `pattern` can both render a calendar date and read it back.
///
/// Patterns with unknown specifiers, or ones that need a time of day,
/// fail when a date is rendered with them.
pub fn is_valid_date_format(pattern: &str) -> bool {
    let Some(sample) = NaiveDate::from_ymd_opt(1998, 4, 21) else {
        return false;
    };
    let mut rendered = String::new();
    if write!(rendered, "{}", sample.format(pattern)).is_err() {
        return false;
    }
    NaiveDate::parse_from_str(&rendered, pattern) == Ok(sample)
}

/// Parse an integer, treating anything unparsable (including empty input)
/// as "no value".
pub fn try_parse_to_int(text: &str) -> Option<i32> {
    text.parse().ok()
}

/// Parse a decimal number, treating anything unparsable as "no value".
pub fn try_parse_to_double(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render a decimal with exactly two fraction digits (`1500.5` -> `"1500.50"`).
pub fn format_decimal(value: f64) -> String {
    format!("{value:.2}")
}

/// The absolute instant at which `date` starts in `tz`.
///
/// When midnight does not exist in `tz` (a daylight-saving gap) the first
/// valid local time of that day is used. An ambiguous midnight resolves to
/// the earlier instant.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    let step = TimeDelta::minutes(15);

    let mut probe = midnight;
    while probe.date() == date {
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                return dt.with_timezone(&Utc);
            }
            LocalResult::None => probe += step,
        }
    }

    Utc.from_utc_datetime(&midnight)
}

/// The calendar date `instant` falls on in `tz`.
pub fn to_local_date<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}
