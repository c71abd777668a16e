// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::schedule::{format_date, format_wall_clock};
use crate::shift_request::ShiftRequestStatus;
use crate::suggestion::SuggestionStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Month token is not a valid `YYYY-MM` value.
    InvalidMonth(String),
    /// Failed to parse a calendar date.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a wall-clock time.
    TimeParseError {
        /// The invalid time string.
        time_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a UTC timestamp.
    TimestampParseError {
        /// The invalid timestamp string.
        timestamp: String,
        /// The parsing error message.
        error: String,
    },
    /// End time is not strictly after start time.
    InvalidTimeRange {
        /// The start of the range.
        start: time::Time,
        /// The end of the range.
        end: time::Time,
    },
    /// A date does not fall within the month it was expected in.
    DateOutsideMonth {
        /// The offending date.
        date: time::Date,
        /// The expected month (`YYYY-MM`).
        month: String,
    },
    /// Project name is empty or invalid.
    InvalidProjectName(String),
    /// Required headcount must be at least one.
    InvalidRequiredMembers {
        /// The invalid count value.
        count: i64,
    },
    /// A status string did not match any known status value.
    InvalidStatus {
        /// The kind of record the status belongs to.
        kind: &'static str,
        /// The invalid status value.
        value: String,
    },
    /// A shift request status transition is not permitted.
    InvalidShiftRequestTransition {
        /// The current status.
        from: ShiftRequestStatus,
        /// The requested status.
        to: ShiftRequestStatus,
    },
    /// A shift request can no longer be edited by its owner.
    ShiftRequestNotEditable {
        /// The shift request ID.
        shift_request_id: String,
        /// The current status.
        status: ShiftRequestStatus,
    },
    /// The suggestion has already been approved.
    SuggestionAlreadyApproved {
        /// The suggestion ID.
        suggestion_id: String,
    },
    /// A suggestion status transition is not permitted.
    InvalidSuggestionTransition {
        /// The suggestion ID.
        suggestion_id: String,
        /// The current status.
        from: SuggestionStatus,
        /// The requested status.
        to: SuggestionStatus,
    },
    /// Time zone name is not a known IANA zone.
    InvalidTimezone(String),
    /// A local wall-clock time does not map to a single instant.
    UnresolvableLocalTime {
        /// The date and time that could not be resolved.
        local: String,
        /// The time zone it was resolved in.
        timezone: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(value) => {
                write!(f, "Invalid month '{value}': expected YYYY-MM")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::TimeParseError { time_string, error } => {
                write!(f, "Failed to parse time '{time_string}': {error}")
            }
            Self::TimestampParseError { timestamp, error } => {
                write!(f, "Failed to parse timestamp '{timestamp}': {error}")
            }
            Self::InvalidTimeRange { start, end } => {
                write!(
                    f,
                    "End time {} must be after start time {}",
                    format_wall_clock(*end),
                    format_wall_clock(*start)
                )
            }
            Self::DateOutsideMonth { date, month } => {
                write!(f, "Date {} is outside month {month}", format_date(*date))
            }
            Self::InvalidProjectName(msg) => write!(f, "Invalid project name: {msg}"),
            Self::InvalidRequiredMembers { count } => {
                write!(
                    f,
                    "Invalid required member count: {count}. Must be at least 1"
                )
            }
            Self::InvalidStatus { kind, value } => {
                write!(f, "Invalid {kind} status: '{value}'")
            }
            Self::InvalidShiftRequestTransition { from, to } => {
                write!(f, "Shift request cannot move from {from} to {to}")
            }
            Self::ShiftRequestNotEditable {
                shift_request_id,
                status,
            } => {
                write!(
                    f,
                    "Shift request {shift_request_id} is {status} and can no longer be changed"
                )
            }
            Self::SuggestionAlreadyApproved { suggestion_id } => {
                write!(f, "Optimization suggestion {suggestion_id} is already approved")
            }
            Self::InvalidSuggestionTransition {
                suggestion_id,
                from,
                to,
            } => {
                write!(
                    f,
                    "Optimization suggestion {suggestion_id} cannot move from {from} to {to}"
                )
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid time zone: {tz}"),
            Self::UnresolvableLocalTime { local, timezone } => {
                write!(
                    f,
                    "Could not resolve {local} in {timezone} (ambiguous or non-existent due to DST)"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
