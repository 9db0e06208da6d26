//! Reading and writing the calendar dates stored in [`Paper`](super::Paper) entries.
//!
//! Dates are always written as ISO-8601 calendar dates (`YYYY-MM-DD`). Reading accepts the
//! following, after trimming surrounding whitespace:
//!
//! - `YYYY-MM-DD` or `YYYYMMDD`
//! - `YYYY-MM`, read as the first day of the month
//! - `YYYY`, read as the first of January
//! - ISO week dates `YYYY-Www-D` or `YYYYWwwD`, and `YYYY-Www` or `YYYYWww` for the Monday
//! - any of the above followed by `T` or a single space and a time of day written as `HH`,
//!   `HH:MM`, `HHMM`, `HH:MM:SS` or `HHMMSS`, where seconds may carry a fraction after `.` or
//!   `,`, optionally followed by `Z` or a UTC offset `+HH`, `+HHMM` or `+HH:MM` (or with `-`)
//!
//! The time of day is checked but then dropped, and the date is kept as written. An offset never
//! moves the date to another day. `24:00` is midnight at the end of the day, so it reads as the
//! following date.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveTime, Weekday};

const TIME_FORMATS: [&str; 6] = [
    "%H:%M:%S%.f",
    "%H:%M:%S",
    "%H:%M",
    "%H%M%S%.f",
    "%H%M%S",
    "%H%M",
];

/// Text that is not a date this module can read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidDate(String);

impl InvalidDate {
    /// The text that failed to parse.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvalidDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not an ISO-8601 date", self.0)
    }
}

impl std::error::Error for InvalidDate {}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Reads a date from `text`.
///
/// Empty (or whitespace only) text is no date at all and returns `Ok(None)`.
///
/// # Errors
///
/// Returns [`InvalidDate`] when the text is not one of the forms listed in the [module
/// docs](self).
pub fn parse(text: &str) -> Result<Option<NaiveDate>, InvalidDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let invalid = || InvalidDate(text.to_owned());

    let (date, time) = match trimmed.find(|c: char| c == 'T' || c == ' ') {
        Some(at) => (&trimmed[..at], Some(&trimmed[at + 1..])),
        None => (trimmed, None),
    };

    let date = parse_calendar_date(date).ok_or_else(invalid)?;
    match time.map(parse_clock) {
        None | Some(Some(Clock::SameDay)) => Ok(Some(date)),
        Some(Some(Clock::EndOfDay)) => date.succ_opt().map(Some).ok_or_else(invalid),
        Some(None) => Err(invalid()),
    }
}

fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    if s.contains('W') {
        return parse_week_date(s);
    }

    let bytes = s.as_bytes();
    match bytes.len() {
        // YYYY
        4 if all_digits(s) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        // YYYYMMDD
        8 if all_digits(s) => NaiveDate::from_ymd_opt(
            s[..4].parse().ok()?,
            s[4..6].parse().ok()?,
            s[6..].parse().ok()?,
        ),
        // YYYY-MM
        7 if bytes[4] == b'-' && all_digits(&s[..4]) && all_digits(&s[5..]) => {
            NaiveDate::from_ymd_opt(s[..4].parse().ok()?, s[5..].parse().ok()?, 1)
        }
        // YYYY-MM-DD
        10 if bytes[4] == b'-' && bytes[7] == b'-' => {
            if [&s[..4], &s[5..7], &s[8..]].into_iter().all(all_digits) {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

/// `YYYY-Www[-D]` or `YYYYWww[D]`, the day of the week defaulting to Monday.
fn parse_week_date(s: &str) -> Option<NaiveDate> {
    let year = s.get(..4).filter(|year| all_digits(year))?.parse().ok()?;
    let rest = s.get(4..)?;
    let (extended, rest) = match rest.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };

    let rest = rest.strip_prefix('W')?;
    let week = rest.get(..2).filter(|week| all_digits(week))?.parse().ok()?;
    let day = match rest.get(2..)? {
        "" => "1",
        day if extended => day.strip_prefix('-')?,
        day => day,
    };

    if day.len() != 1 || !all_digits(day) {
        return None;
    }
    let day: i64 = day.parse().ok()?;
    if !(1..=7).contains(&day) {
        return None;
    }

    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?
        .checked_add_signed(Duration::days(day - 1))
}

enum Clock {
    SameDay,
    /// `24:00`, midnight at the end of the day.
    EndOfDay,
}

fn parse_clock(s: &str) -> Option<Clock> {
    let clock = strip_offset(s)?.replace(',', ".");

    if let Some(rest) = clock.strip_prefix("24") {
        let midnight = rest.bytes().all(|b| matches!(b, b'0' | b':' | b'.'));
        return (midnight && is_time_of_day(&format!("00{rest}"))).then_some(Clock::EndOfDay);
    }

    is_time_of_day(&clock).then_some(Clock::SameDay)
}

fn is_time_of_day(clock: &str) -> bool {
    // chrono needs minutes so an hour on its own is read as on the hour
    if clock.len() == 2 && all_digits(clock) {
        return NaiveTime::parse_from_str(&format!("{clock}:00"), "%H:%M").is_ok();
    }

    TIME_FORMATS
        .iter()
        .any(|fmt| NaiveTime::parse_from_str(clock, fmt).is_ok())
}

/// Removes a trailing `Z` or numeric UTC offset, returning `None` when the offset is malformed.
fn strip_offset(s: &str) -> Option<&str> {
    if let Some(clock) = s.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        return Some(clock);
    }

    match s.rfind(|c: char| c == '+' || c == '-') {
        Some(at) => {
            let offset = &s[at + 1..];
            let well_formed = match offset.len() {
                2 | 4 => all_digits(offset),
                5 => {
                    offset.as_bytes()[2] == b':'
                        && all_digits(&offset[..2])
                        && all_digits(&offset[3..])
                }
                _ => false,
            };
            well_formed.then(|| &s[..at])
        }
        None => Some(s),
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn format_pads_month_and_day() {
        assert_eq!("2023-05-07", format(ymd(2023, 5, 7).unwrap()));
    }

    #[test]
    fn empty_text_is_no_date() {
        assert_eq!(Ok(None), parse(""));
        assert_eq!(Ok(None), parse("   "));
    }

    #[test]
    fn calendar_date_forms() {
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-05-17"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse(" 2023-05-17\n"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("20230517"));
        assert_eq!(Ok(ymd(2023, 5, 1)), parse("2023-05"));
        assert_eq!(Ok(ymd(2023, 1, 1)), parse("2023"));
    }

    #[test]
    fn week_date_forms() {
        assert_eq!(Ok(ymd(2023, 5, 15)), parse("2023-W20"));
        assert_eq!(Ok(ymd(2023, 5, 15)), parse("2023W20"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-W20-3"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023W203"));
        // week 1 of 2021 starts in 2021 while week 53 of 2020 runs into January
        assert_eq!(Ok(ymd(2021, 1, 3)), parse("2020-W53-7"));
    }

    #[test]
    fn date_time_is_truncated_to_the_date() {
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-05-17T13:45"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-05-17T13:45:10"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-05-17 13:45:10.250"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("20230517T134510"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-05-17T13"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-05-17T1345"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-05-17T13:45:10,5"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-05-17T134510.5"));
    }

    #[test]
    fn end_of_day_midnight_is_the_next_date() {
        assert_eq!(Ok(ymd(2023, 5, 18)), parse("2023-05-17T24:00"));
        assert_eq!(Ok(ymd(2023, 5, 18)), parse("2023-05-17T24:00:00.000Z"));
        assert_eq!(Ok(ymd(2024, 1, 1)), parse("2023-12-31T24"));
    }

    #[test]
    fn offsets_do_not_move_the_date() {
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-05-17T23:30:00Z"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-05-17T23:30:00+05:30"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-05-17T00:30:00-0800"));
        assert_eq!(Ok(ymd(2023, 5, 17)), parse("2023-05-17T00:30-08"));
    }

    #[test]
    fn rejects_text_that_is_not_a_date() {
        for text in [
            "yesterday",
            "17/05/2023",
            "2023-13-01",
            "2023-02-30",
            "2023-05-17T",
            "2023-05-17T25:00",
            "2023-05-17T12:00+5",
            "2023-05-17Tnoon",
            "2023-05-17T24:30",
            "2023-05-17T13:45.5",
            "202305",
            "20230-5",
            "2023-W54",
            "2023-W20-8",
            "2023-W203",
            "2023W20-3",
            "23",
        ] {
            let err = parse(text).expect_err(text);
            assert_eq!(text, err.text());
        }
    }
}
