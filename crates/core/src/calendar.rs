// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use async_trait::async_trait;
use chrono_tz::Tz;
use sifut_domain::{ConfirmedShift, Project, ShiftWindow, resolve_shift_window};

use crate::error::CoreError;

/// A calendar entry for one confirmed shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Event title. The project name.
    pub summary: String,
    /// The shift's comment, if any.
    pub description: Option<String>,
    pub window: ShiftWindow,
    /// Attendee email addresses.
    pub attendees: Vec<String>,
}

impl CalendarEvent {
    /// Builds the event for `shift`, resolving its times in `tz`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shift's wall-clock times do not exist or are
    /// ambiguous in `tz` on that date.
    pub fn for_confirmed_shift(
        shift: &ConfirmedShift,
        project: &Project,
        tz: Tz,
        attendees: Vec<String>,
    ) -> Result<Self, CoreError> {
        let window: ShiftWindow = resolve_shift_window(shift.date, shift.range, tz)?;
        Ok(Self {
            summary: project.name.clone(),
            description: shift.comment.clone(),
            window,
            attendees,
        })
    }
}

/// The provider's handle on a created event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEventRef {
    pub event_id: String,
    pub html_link: Option<String>,
}

/// Ways a calendar call can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarFailure {
    Network(String),
    Authentication(String),
    Provider { status: u16, message: String },
    MalformedResponse(String),
}

impl std::fmt::Display for CalendarFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {msg}"),
            Self::Authentication(msg) => write!(f, "Authentication failed: {msg}"),
            Self::Provider { status, message } => {
                write!(f, "Calendar provider error ({status}): {message}")
            }
            Self::MalformedResponse(msg) => write!(f, "Malformed calendar response: {msg}"),
        }
    }
}

impl std::error::Error for CalendarFailure {}

/// An external calendar that confirmed shifts are mirrored into.
#[async_trait]
pub trait CalendarGateway: Send + Sync {
    /// Creates an event and returns its provider handle.
    async fn create_shift_event(
        &self,
        event: &CalendarEvent,
    ) -> Result<CalendarEventRef, CalendarFailure>;

    /// Deletes a previously created event.
    async fn delete_event(&self, event_id: &str) -> Result<(), CalendarFailure>;
}
