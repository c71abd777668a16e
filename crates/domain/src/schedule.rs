// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar primitives shared by every scheduling record.
//!
//! Dates travel as `YYYY-MM-DD`, wall-clock times as `HH:MM:SS` (with
//! `HH:MM` accepted on input), and timestamps as UTC RFC 3339. The
//! formatting helpers here are infallible so that callers never need to
//! unwrap a formatter result.

use std::str::FromStr;

use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time, UtcOffset};

use crate::error::DomainError;

const DATE_FORMAT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");
const WALL_CLOCK_FORMAT: &[FormatItem<'_>] = format_description!("[hour]:[minute]:[second]");
const SHORT_WALL_CLOCK_FORMAT: &[FormatItem<'_>] = format_description!("[hour]:[minute]");
const TIMESTAMP_FORMAT: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// A calendar month, the unit an optimization run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Month {
    year: i32,
    month: time::Month,
}

impl Month {
    /// Creates a month from its components.
    #[must_use]
    pub const fn new(year: i32, month: time::Month) -> Self {
        Self { year, month }
    }

    /// The month containing `date`.
    #[must_use]
    pub const fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> time::Month {
        self.month
    }

    /// Returns the first day of the month.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside the range `time` supports.
    pub fn first_day(&self) -> Result<Date, DomainError> {
        Date::from_calendar_date(self.year, self.month, 1)
            .map_err(|_| DomainError::InvalidMonth(self.to_string()))
    }

    /// Returns the last day of the month.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside the range `time` supports.
    pub fn last_day(&self) -> Result<Date, DomainError> {
        let (next_year, next_month) = if self.month == time::Month::December {
            (self.year + 1, time::Month::January)
        } else {
            (self.year, self.month.next())
        };

        Date::from_calendar_date(next_year, next_month, 1)
            .ok()
            .and_then(Date::previous_day)
            .ok_or_else(|| DomainError::InvalidMonth(self.to_string()))
    }

    /// Whether `date` falls in this month.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for Month {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidMonth(s.to_string());

        let (year_part, month_part) = s.split_once('-').ok_or_else(invalid)?;
        if year_part.len() != 4
            || month_part.len() != 2
            || !year_part.bytes().all(|b| b.is_ascii_digit())
            || !month_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month_number: u8 = month_part.parse().map_err(|_| invalid())?;
        let month: time::Month = time::Month::try_from(month_number).map_err(|_| invalid())?;

        Ok(Self { year, month })
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

/// A validated wall-clock interval on a single day.
///
/// Invariant: `end` is strictly after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: Time,
    end: Time,
}

impl TimeRange {
    /// Creates a new time range.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is not strictly after `start`.
    pub fn new(start: Time, end: Time) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> Time {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Time {
        self.end
    }
}

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Parses a wall-clock time in `HH:MM` or `HH:MM:SS` form.
///
/// # Errors
///
/// Returns an error if the string matches neither form.
pub fn parse_wall_clock(value: &str) -> Result<Time, DomainError> {
    let parsed = if value.len() == 5 {
        Time::parse(value, SHORT_WALL_CLOCK_FORMAT)
    } else {
        Time::parse(value, WALL_CLOCK_FORMAT)
    };

    parsed.map_err(|e| DomainError::TimeParseError {
        time_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Parses an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns an error if the string is not valid RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| DomainError::TimestampParseError {
        timestamp: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    // Every component named by the descriptions is present on the value.
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// Formats a time as `HH:MM:SS`.
#[must_use]
pub fn format_wall_clock(value: Time) -> String {
    value
        .format(WALL_CLOCK_FORMAT)
        .unwrap_or_else(|_| value.to_string())
}

/// Formats a timestamp as UTC RFC 3339 with second precision.
#[must_use]
pub fn format_timestamp(value: OffsetDateTime) -> String {
    let utc: OffsetDateTime = value.to_offset(UtcOffset::UTC);
    utc.format(TIMESTAMP_FORMAT).unwrap_or_else(|_| utc.to_string())
}
