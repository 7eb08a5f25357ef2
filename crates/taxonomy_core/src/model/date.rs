//! Calendar day value used as work completion date.
//!
//! # Responsibility
//! - Parse `YYYY-M-D` strings into validated calendar days.
//! - Re-render dates in canonical minimal-width form.
//!
//! # Invariants
//! - Year, month and day are all non-zero.
//! - The day exists in the real calendar (no February 31).
//! - Equality and ordering follow the represented day.

use crate::model::{ModelError, ModelResult};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*-\s*(\d+)\s*-\s*(\d+)\s*$").expect("valid calendar date regex")
});

/// Immutable calendar day, without time or timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Parses a `year-month-day` string; components need not be zero-padded.
    ///
    /// # Errors
    /// - `ModelError::InvalidDate` when the field count is not three, when a
    ///   component is zero or not numeric, or when the day does not exist.
    pub fn parse(source: &str) -> ModelResult<Self> {
        let invalid = || ModelError::InvalidDate(source.to_string());

        let captures = DATE_RE.captures(source).ok_or_else(invalid)?;
        let year: i32 = captures[1].parse().map_err(|_| invalid())?;
        let month: u32 = captures[2].parse().map_err(|_| invalid())?;
        let day: u32 = captures[3].parse().map_err(|_| invalid())?;

        if year == 0 {
            return Err(invalid());
        }

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Builds a date from numeric components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> ModelResult<Self> {
        Self::parse(&format!("{year}-{month}-{day}"))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Underlying chrono value, for callers that need date arithmetic.
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::CalendarDate;
    use crate::model::ModelError;

    #[test]
    fn parses_valid_padded_date() {
        let date = CalendarDate::parse("1995-04-29").expect("valid date");
        assert_eq!((date.year(), date.month(), date.day()), (1995, 4, 29));
    }

    #[test]
    fn to_string_drops_zero_padding() {
        let date = CalendarDate::parse("2020-07-09").expect("valid date");
        assert_eq!(date.to_string(), "2020-7-9");
        assert_eq!(
            CalendarDate::parse(&date.to_string()).expect("canonical form parses"),
            date
        );
    }

    #[test]
    fn rejects_impossible_day() {
        let err = CalendarDate::parse("1995-02-31").unwrap_err();
        assert_eq!(err, ModelError::InvalidDate("1995-02-31".to_string()));
        assert_eq!(err.to_string(), "invalid date string: '1995-02-31'");
    }

    #[test]
    fn rejects_garbage_and_wrong_field_count() {
        for source in [
            "DEFINITELY NOT A DATE",
            "XXXX-YY-ZZ",
            "1995-02",
            "1995-02-03-04",
            "",
            "0-1-1",
            "2000-0-1",
            "2000-1-0",
        ] {
            assert!(
                matches!(CalendarDate::parse(source), Err(ModelError::InvalidDate(_))),
                "expected failure for `{source}`"
            );
        }
    }

    #[test]
    fn leap_day_depends_on_year() {
        assert!(CalendarDate::parse("2020-2-29").is_ok());
        assert!(CalendarDate::parse("2021-2-29").is_err());
    }

    #[test]
    fn ordering_follows_calendar() {
        let older = CalendarDate::parse("2013-7-9").expect("valid date");
        let newer = CalendarDate::parse("2021-04-26").expect("valid date");
        assert!(older < newer);
        assert_eq!(
            CalendarDate::parse("2021-4-26").expect("valid date"),
            newer
        );
    }
}
