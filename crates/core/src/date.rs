// SPDX-License-Identifier: MIT

//!
//! The Timescape date type
//!
//! Every date is reduced to a single real number, the *decimal year*, which is
//! what the rest of Timescape sorts, subtracts, and scales.  Negative years are
//! BCE and go through exactly the same arithmetic as CE years.
//!

use chrono::{Datelike, NaiveDate};
use log::trace;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// The minimum year allowed in the Timescape system
pub const MIN_YEAR: i64 = -50000;

/// The maximum year allowed in the Timescape system
pub const MAX_YEAR: i64 = 10000;

/// The fixed length of a year used for all cross-era linear positioning
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Errors that can arise when strictly constructing a [`CalendarDate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The day number is not allowed (must be 1 <= day <= 31)
    #[error("Day `{0}` is not allowed")]
    InvalidDay(i64),

    /// The month number is not allowed (must be 1 <= month <= 12)
    #[error("Month `{0}` is not allowed")]
    InvalidMonth(i64),

    /// The year is not allowed (must be [`MIN_YEAR`] <= year <= [`MAX_YEAR`])
    #[error("Year `{0}` is not allowed")]
    InvalidYear(i64),

    /// The string isn't of the form `[-]YYYY[-MM[-DD]]`
    #[error("`{0}` is not a date")]
    Unparseable(String),
}

/// The Timescape day type
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct Day(u8);

/// The Timescape month type
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct Month(u8);

/// The Timescape year type (negative values are BCE)
///
/// The minimum year allowed is [`MIN_YEAR`].  The maximum year allowed is
/// [`MAX_YEAR`]
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct Year(i32);

impl Day {
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Month {
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Three letter English abbreviation
    pub fn abbreviation(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        NAMES[usize::from(self.0.clamp(1, 12) - 1)]
    }
}

impl Year {
    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn min() -> Self {
        Year(MIN_YEAR as i32)
    }

    pub fn max() -> Self {
        Year(MAX_YEAR as i32)
    }

    /// Whether the (proleptic Gregorian) year is a leap year
    pub fn is_leap(&self) -> bool {
        (self.0 % 4 == 0 && self.0 % 100 != 0) || self.0 % 400 == 0
    }
}

impl TryFrom<i64> for Day {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (1..=31).contains(&value) {
            Ok(Day(value as u8))
        } else {
            Err(DateError::InvalidDay(value))
        }
    }
}

impl TryFrom<i64> for Month {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (1..=12).contains(&value) {
            Ok(Month(value as u8))
        } else {
            Err(DateError::InvalidMonth(value))
        }
    }
}

impl TryFrom<i64> for Year {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (MIN_YEAR..=MAX_YEAR).contains(&value) {
            Ok(Year(value as i32))
        } else {
            Err(DateError::InvalidYear(value))
        }
    }
}

/// A calendar date together with its decimal year
///
/// The decimal year is `year + (day_of_year - 1) / 365.25`.  It never
/// decreases as the literal date advances, so two dates in the same year are
/// ordered correctly, but sub-year precision is approximate.
#[derive(Serialize, Clone, Copy, Debug)]
pub struct CalendarDate {
    year: Year,
    month: Month,
    day: Day,
    decimal_year: f64,
}

impl CalendarDate {
    /// Create a new [`CalendarDate`] if every field is in range
    pub fn from_ymd(year: i64, month: i64, day: i64) -> Result<Self, DateError> {
        let year = Year::try_from(year)?;
        let month = Month::try_from(month)?;
        let day = Day::try_from(day)?;
        Ok(Self::from_parts(year, month, day))
    }

    /// Parse a date string of the form `[-]YYYY[-MM[-DD]]`, never failing.
    ///
    /// A leading `-` makes the year BCE.  Any time component (`T...`) is
    /// ignored.  Missing or unparseable segments default to `1`, and segments
    /// that are out of range are clamped into range.
    pub fn parse(text: &str) -> Self {
        let segments = DateSegments::split(text);
        if segments.year.is_none() {
            trace!("no year in {text:?}, defaulting to 1");
        }
        let year = segments.year.unwrap_or(1).clamp(MIN_YEAR, MAX_YEAR);
        let month = segments.month.unwrap_or(1).clamp(1, 12);
        let day = segments.day.unwrap_or(1).clamp(1, 31);
        Self::from_parts(Year(year as i32), Month(month as u8), Day(day as u8))
    }

    /// The inverse of [`CalendarDate::decimal_year`], to the nearest day.
    ///
    /// Non-finite input is treated as the year 1 and out of range years are
    /// clamped.
    pub fn from_decimal_year(decimal_year: f64) -> Self {
        let decimal_year = if decimal_year.is_finite() {
            decimal_year.clamp(MIN_YEAR as f64, MAX_YEAR as f64)
        } else {
            1.0
        };
        let year = Year(decimal_year.floor() as i32);
        let days_in_year = if year.is_leap() { 366 } else { 365 };
        let ordinal = ((decimal_year - f64::from(year.0)) * DAYS_PER_YEAR).round() as u32 + 1;
        let ordinal = ordinal.clamp(1, days_in_year);
        match NaiveDate::from_yo_opt(year.0, ordinal) {
            Some(date) => Self::from_parts(year, Month(date.month() as u8), Day(date.day() as u8)),
            None => Self::from_parts(year, Month(1), Day(1)),
        }
    }

    fn from_parts(year: Year, month: Month, day: Day) -> Self {
        let ordinal = ordinal(year, month, day);
        let decimal_year = f64::from(year.0) + f64::from(ordinal - 1) / DAYS_PER_YEAR;
        Self {
            year,
            month,
            day,
            decimal_year,
        }
    }

    /// Get the [`CalendarDate`]'s day
    pub fn day(&self) -> Day {
        self.day
    }

    /// Get the [`CalendarDate`]'s month
    pub fn month(&self) -> Month {
        self.month
    }

    /// Get the [`CalendarDate`]'s year
    pub fn year(&self) -> Year {
        self.year
    }

    /// The single linearisation used for comparison, sorting and arithmetic
    pub fn decimal_year(&self) -> f64 {
        self.decimal_year
    }

    /// The (1 based) day of the year.  Days past the end of a month (e.g. the
    /// 31st of April) count as the month's last day.
    pub fn day_of_year(&self) -> u32 {
        ordinal(self.year, self.month, self.day)
    }

    /// e.g. `1 Jan 2025` or `15 Mar 44 BCE`
    pub fn as_long_date_format(&self) -> String {
        let year = self.year.value();
        let year = if year < 0 {
            format!("{} BCE", -i64::from(year))
        } else {
            format!("{year}")
        };
        format!("{} {} {year}", self.day, self.month.abbreviation())
    }
}

/// `b - a` in (decimal) years
pub fn difference_in_years(a: &CalendarDate, b: &CalendarDate) -> f64 {
    b.decimal_year - a.decimal_year
}

/// Every whole year from `a`'s year to `b`'s year inclusive (empty if `b` is
/// before `a`).  Used for axis ticks, not layout.
pub fn each_year_of_interval(a: &CalendarDate, b: &CalendarDate) -> RangeInclusive<i32> {
    a.year.value()..=b.year.value()
}

/// Day of year via the proleptic Gregorian calendar, clamping days that run
/// past the end of the month
fn ordinal(year: Year, month: Month, day: Day) -> u32 {
    let month = u32::from(month.value());
    NaiveDate::from_ymd_opt(year.value(), month, u32::from(day.value()))
        .or_else(|| last_day_of_month(year.value(), month))
        .map_or(1, |date| date.ordinal())
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// The raw `[-]YYYY[-MM[-DD]]` segments of a date string
struct DateSegments {
    year: Option<i64>,
    month: Option<i64>,
    day: Option<i64>,
    extra: bool,
}

impl DateSegments {
    fn split(text: &str) -> Self {
        let text = text.trim();
        let text = text.split_once('T').map_or(text, |(date, _)| date);
        let (is_bce, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let mut segments = text.split('-').map(|segment| segment.trim().parse::<i64>().ok());
        let year = segments
            .next()
            .flatten()
            .map(|year| if is_bce { -year } else { year });
        let month = segments.next().flatten();
        let day = segments.next().flatten();
        let extra = segments.next().is_some();
        Self {
            year,
            month,
            day,
            extra,
        }
    }
}

/// Strict parsing, for input that should be rejected rather than repaired
impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let segments = DateSegments::split(text);
        if segments.extra {
            return Err(DateError::Unparseable(text.to_string()));
        }
        let Some(year) = segments.year else {
            return Err(DateError::Unparseable(text.to_string()));
        };
        Self::from_ymd(
            year,
            segments.month.unwrap_or(1),
            segments.day.unwrap_or(1),
        )
    }
}

/// ISO extended format (e.g. `-0150-01-01`)
impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.year.value();
        let sign = if year < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{:04}-{:02}-{:02}",
            year.unsigned_abs(),
            self.month.value(),
            self.day.value()
        )
    }
}

// The decimal year is derived from the other fields, so they alone decide
// equality and ordering
impl PartialEq for CalendarDate {
    fn eq(&self, other: &Self) -> bool {
        (self.year, self.month, self.day) == (other.year, other.month, other.day)
    }
}

impl Eq for CalendarDate {}

impl Hash for CalendarDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.year, self.month, self.day).hash(state);
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_ymd() {
        // Should return error
        assert!(CalendarDate::from_ymd(999_999, 1, 1).is_err());
        assert!(CalendarDate::from_ymd(-999_999, 1, 1).is_err());
        assert_eq!(
            CalendarDate::from_ymd(1234, 0, 1),
            Err(DateError::InvalidMonth(0))
        );
        assert_eq!(
            CalendarDate::from_ymd(1234, 12, 32),
            Err(DateError::InvalidDay(32))
        );

        // Should be ok
        assert!(CalendarDate::from_ymd(1, 1, 1).is_ok());
        assert!(CalendarDate::from_ymd(-50000, 12, 31).is_ok());
    }

    #[test]
    fn parse_full_and_partial() {
        let date = CalendarDate::parse("2024-03-15");
        assert_eq!(date.year().value(), 2024);
        assert_eq!(date.month().value(), 3);
        assert_eq!(date.day().value(), 15);

        let date = CalendarDate::parse("1969");
        assert_eq!((date.month().value(), date.day().value()), (1, 1));
        assert_eq!(date.decimal_year(), 1969.0);

        let date = CalendarDate::parse("2001-07-04T12:30:00Z");
        assert_eq!(date, CalendarDate::from_ymd(2001, 7, 4).unwrap());
    }

    #[test]
    fn parse_bce() {
        let date = CalendarDate::parse("-0150-01-01");
        assert_eq!(date.year().value(), -150);
        assert_eq!(date.decimal_year(), -150.0);

        let later = CalendarDate::parse("-0150-07-01");
        assert!(later.decimal_year() > date.decimal_year());
        assert!(later.decimal_year() < -149.0);
    }

    #[test]
    fn parse_fails_soft() {
        let date = CalendarDate::parse("2020-xx-yy");
        assert_eq!((date.month().value(), date.day().value()), (1, 1));

        let date = CalendarDate::parse("");
        assert_eq!(date.year().value(), 1);

        let date = CalendarDate::parse("2020-13-40");
        assert_eq!((date.month().value(), date.day().value()), (12, 31));

        let date = CalendarDate::parse("999999");
        assert_eq!(date.year(), Year::max());
    }

    #[test]
    fn strict_parse() {
        assert!("2020-02-03".parse::<CalendarDate>().is_ok());
        assert!("-44-03-15".parse::<CalendarDate>().is_ok());
        assert!("abc".parse::<CalendarDate>().is_err());
        assert!("2020-13-01".parse::<CalendarDate>().is_err());
        assert!("2020-01-01-01".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn decimal_year_is_monotonic() {
        // Walk every literal day of a leap year, a common year, and a BCE year
        for year in [2024, 2023, -45, 0] {
            let mut previous = f64::NEG_INFINITY;
            for month in 1..=12 {
                for day in 1..=31 {
                    let date = CalendarDate::from_ymd(year, month, day).unwrap();
                    assert!(date.decimal_year() >= previous);
                    assert!(date.decimal_year() < (year + 1) as f64);
                    previous = date.decimal_year();
                }
            }
        }
    }

    #[test]
    fn days_past_month_end_are_clamped() {
        let feb_30 = CalendarDate::from_ymd(2023, 2, 30).unwrap();
        let feb_28 = CalendarDate::from_ymd(2023, 2, 28).unwrap();
        assert_eq!(feb_30.decimal_year(), feb_28.decimal_year());
        assert_eq!(feb_30.day_of_year(), 59);
    }

    #[test]
    fn difference() {
        let a = CalendarDate::parse("-0100-01-01");
        let b = CalendarDate::parse("0100-01-01");
        assert_eq!(difference_in_years(&a, &b), 200.0);
        assert_eq!(difference_in_years(&b, &a), -200.0);
    }

    #[test]
    fn years_of_interval() {
        let a = CalendarDate::parse("-0002-06-01");
        let b = CalendarDate::parse("0002-01-01");
        let years: Vec<i32> = each_year_of_interval(&a, &b).collect();
        assert_eq!(years, vec![-2, -1, 0, 1, 2]);
        assert_eq!(each_year_of_interval(&b, &a).count(), 0);
    }

    #[test]
    fn decimal_year_round_trip() {
        for text in ["2024-03-15", "-0150-10-02", "0000-12-31", "1999-01-01"] {
            let date = CalendarDate::parse(text);
            assert_eq!(CalendarDate::from_decimal_year(date.decimal_year()), date);
        }
        assert_eq!(
            CalendarDate::from_decimal_year(f64::NAN),
            CalendarDate::parse("0001-01-01")
        );
    }

    #[test]
    fn formatting() {
        let date = CalendarDate::parse("-0150-01-01");
        assert_eq!(date.to_string(), "-0150-01-01");
        assert_eq!(date.as_long_date_format(), "1 Jan 150 BCE");
        let date = CalendarDate::parse("2025-12-25");
        assert_eq!(date.as_long_date_format(), "25 Dec 2025");
    }

    #[test]
    fn cmp() {
        let date_1 = CalendarDate::parse("0234");
        let date_2 = CalendarDate::parse("4321");
        assert!(date_2 > date_1);
        assert!(date_1 < date_2);
        assert!(date_1 == date_1);
        assert!(date_1 != date_2);

        // Difference of 1 day
        let date_1 = CalendarDate::parse("0234-01-01");
        let date_2 = CalendarDate::parse("0234-01-02");
        assert!(date_2 > date_1);
    }

    #[test]
    fn deserialize() {
        let date: CalendarDate = serde_json::from_str(r#""-0044-03-15""#).unwrap();
        assert_eq!(date.year().value(), -44);
        assert!(serde_json::from_str::<CalendarDate>(r#""not a date""#).is_err());
    }
}
