//! Date parsing with a day-before-month default.
//!
//! Numeric dates such as `03/04/2024` are read as 3 April 2024. When the
//! day-first reading is impossible (`12/25/2024`) the month-first reading is
//! used instead. Year-first input (`2024-04-03`) is always year-month-day.
//! A trailing time of day is ignored.

use chrono::NaiveDate;

/// Formats tried, in order, for dates that spell out the month.
const NAMED_MONTH_FORMATS: &[&str] = &[
    "%d-%b-%y",  // 15-Jan-24
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%b %d %Y",  // Jan 15 2024
    "%B %d %Y",  // January 15 2024
    "%Y-%b-%d",  // 2024-Jan-15
];

/// Parse a date string, preferring day-before-month when ambiguous.
///
/// Returns `None` for anything that cannot be read as a calendar date.
pub fn parse_day_first_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = strip_time_of_day(trimmed);
    parse_numeric_date(&date_part).or_else(|| parse_named_month_date(&date_part))
}

/// Normalize a date string to ISO `YYYY-MM-DD`, or `None` when unparseable.
pub fn normalize_date(value: &str) -> Option<String> {
    parse_day_first_date(value).map(format_iso8601_date)
}

/// Format a NaiveDate to ISO 8601 date string.
pub fn format_iso8601_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn is_time_token(token: &str) -> bool {
    token.contains(':') || token.eq_ignore_ascii_case("am") || token.eq_ignore_ascii_case("pm")
}

fn strip_time_of_day(value: &str) -> String {
    if let Some((date, time)) = value.split_once('T') {
        let numeric_date = date
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '/' | '.'));
        if numeric_date && time.contains(':') {
            return date.to_string();
        }
    }
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let keep = tokens
        .iter()
        .rposition(|token| !is_time_token(token))
        .map_or(0, |idx| idx + 1);
    tokens[..keep].join(" ")
}

fn expand_two_digit_year(year: i32) -> i32 {
    if year < 70 { 2000 + year } else { 1900 + year }
}

fn parse_numeric_date(value: &str) -> Option<NaiveDate> {
    if value.len() == 8 && value.chars().all(|ch| ch.is_ascii_digit()) {
        return NaiveDate::parse_from_str(value, "%Y%m%d").ok();
    }
    let parts: Vec<&str> = value.split(['-', '/', '.']).collect();
    if parts.len() != 3
        || parts
            .iter()
            .any(|part| part.is_empty() || !part.chars().all(|ch| ch.is_ascii_digit()))
    {
        return None;
    }
    let first: u32 = parts[0].parse().ok()?;
    let second: u32 = parts[1].parse().ok()?;
    let third: u32 = parts[2].parse().ok()?;

    if parts[0].len() == 4 {
        return NaiveDate::from_ymd_opt(i32::try_from(first).ok()?, second, third);
    }
    if parts[0].len() > 2 || parts[1].len() > 2 {
        return None;
    }
    let year = match parts[2].len() {
        4 => i32::try_from(third).ok()?,
        2 => expand_two_digit_year(i32::try_from(third).ok()?),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, second, first).or_else(|| NaiveDate::from_ymd_opt(year, first, second))
}

fn parse_named_month_date(value: &str) -> Option<NaiveDate> {
    NAMED_MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}
