// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Zone-aware event windows for calendar sync.
//!
//! Shift dates and times are wall-clock values in the organization's
//! declared time zone. Calendar providers want absolute instants, so the
//! window is resolved here once, in one place.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use time::{Date, Time};

use crate::error::DomainError;
use crate::schedule::TimeRange;

/// A shift's start and end as zone-aware datetimes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl ShiftWindow {
    /// The IANA name of the zone the window was resolved in.
    #[must_use]
    pub fn timezone_name(&self) -> &'static str {
        self.start.timezone().name()
    }
}

/// Parses an IANA time zone name.
///
/// # Errors
///
/// Returns an error if the name is not a known zone.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Resolves a shift's date and time range in `tz`.
///
/// # Errors
///
/// Returns an error if a wall-clock time is skipped or repeated by a DST
/// transition on that date.
pub fn resolve_shift_window(
    date: Date,
    range: TimeRange,
    tz: Tz,
) -> Result<ShiftWindow, DomainError> {
    let naive_date = NaiveDate::from_ymd_opt(
        date.year(),
        u32::from(u8::from(date.month())),
        u32::from(date.day()),
    )
    .ok_or_else(|| DomainError::DateParseError {
        date_string: date.to_string(),
        error: String::from("date is outside the supported range"),
    })?;

    let start = resolve_local(naive_date, range.start(), tz)?;
    let end = resolve_local(naive_date, range.end(), tz)?;

    Ok(ShiftWindow { start, end })
}

fn resolve_local(date: NaiveDate, time: Time, tz: Tz) -> Result<DateTime<Tz>, DomainError> {
    let naive_time = NaiveTime::from_hms_opt(
        u32::from(time.hour()),
        u32::from(time.minute()),
        u32::from(time.second()),
    )
    .ok_or_else(|| DomainError::TimeParseError {
        time_string: time.to_string(),
        error: String::from("time is outside the supported range"),
    })?;

    let local = date.and_time(naive_time);
    tz.from_local_datetime(&local)
        .single()
        .ok_or_else(|| DomainError::UnresolvableLocalTime {
            local: local.to_string(),
            timezone: tz.name().to_string(),
        })
}
