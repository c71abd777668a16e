// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, OffsetDateTime};

use crate::schedule::TimeRange;
use crate::suggestion::OptimizationAssignment;

/// A binding schedule entry.
///
/// Created in bulk when a suggestion is approved, or directly by an
/// administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedShift {
    pub id: String,
    pub user_id: String,
    pub project_id: String,
    pub date: Date,
    pub range: TimeRange,
    /// External calendar event, once synced.
    pub calendar_event_id: Option<String>,
    pub comment: Option<String>,
    /// The administrator who confirmed the shift.
    pub created_by: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl ConfirmedShift {
    /// Projects an approved assignment into a confirmed shift.
    ///
    /// Member, project, date and time range are copied unchanged.
    #[must_use]
    pub fn from_assignment(
        id: String,
        assignment: &OptimizationAssignment,
        created_by: &str,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            user_id: assignment.user_id.clone(),
            project_id: assignment.project_id.clone(),
            date: assignment.date,
            range: assignment.range,
            calendar_event_id: None,
            comment: None,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
