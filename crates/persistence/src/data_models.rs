// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversions to and from domain values.
//!
//! Every column is stored as text except counters and flags. Dates are
//! `YYYY-MM-DD`, times `HH:MM:SS`, timestamps UTC with microseconds, so
//! lexical order equals chronological order.

use diesel::prelude::*;
use sifut_domain::{
    ConfirmedShift, DomainError, OptimizationAssignment, OptimizationSuggestion,
    OptimizationSummary, Project, ShiftRequest, TimeRange, format_date, format_wall_clock,
    parse_date, parse_timestamp, parse_wall_clock,
};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::diesel_schema::{
    confirmed_shifts, optimization_assignments, optimization_suggestions, projects,
    shift_requests,
};
use crate::error::PersistenceError;

fn reconstruction(err: DomainError) -> PersistenceError {
    PersistenceError::ReconstructionError(err.to_string())
}

/// Encodes a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn encode_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
        ))
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn encode_optional_timestamp(
    value: Option<OffsetDateTime>,
) -> Result<Option<String>, PersistenceError> {
    value.map(encode_timestamp).transpose()
}

fn decode_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    parse_timestamp(value).map_err(reconstruction)
}

fn decode_optional_timestamp(
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(decode_timestamp).transpose()
}

fn decode_range(start: &str, end: &str) -> Result<TimeRange, PersistenceError> {
    let start = parse_wall_clock(start).map_err(reconstruction)?;
    let end = parse_wall_clock(end).map_err(reconstruction)?;
    TimeRange::new(start, end).map_err(reconstruction)
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = shift_requests)]
pub struct ShiftRequestRow {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub comment: Option<String>,
    pub status: String,
    pub submitted_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ShiftRequestRow {
    pub fn from_domain(request: &ShiftRequest) -> Result<Self, PersistenceError> {
        Ok(Self {
            id: request.id.clone(),
            user_id: request.user_id.clone(),
            date: format_date(request.date),
            start_time: format_wall_clock(request.range.start()),
            end_time: format_wall_clock(request.range.end()),
            comment: request.comment.clone(),
            status: request.status.as_str().to_string(),
            submitted_at: encode_optional_timestamp(request.submitted_at)?,
            created_at: encode_timestamp(request.created_at)?,
            updated_at: encode_timestamp(request.updated_at)?,
        })
    }

    pub fn into_domain(self) -> Result<ShiftRequest, PersistenceError> {
        Ok(ShiftRequest {
            date: parse_date(&self.date).map_err(reconstruction)?,
            range: decode_range(&self.start_time, &self.end_time)?,
            status: self.status.parse().map_err(reconstruction)?,
            submitted_at: decode_optional_timestamp(self.submitted_at.as_deref())?,
            created_at: decode_timestamp(&self.created_at)?,
            updated_at: decode_timestamp(&self.updated_at)?,
            id: self.id,
            user_id: self.user_id,
            comment: self.comment,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
pub struct ProjectRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub required_members: i32,
    pub color: Option<String>,
    pub is_active: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectRow {
    pub fn from_domain(project: &Project) -> Result<Self, PersistenceError> {
        let required_members: i32 = i32::try_from(project.required_members).map_err(|_| {
            PersistenceError::SerializationError(format!(
                "required_members {} does not fit in a column",
                project.required_members
            ))
        })?;

        Ok(Self {
            id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            required_members,
            color: project.color.clone(),
            is_active: i32::from(project.is_active),
            created_at: encode_timestamp(project.created_at)?,
            updated_at: encode_timestamp(project.updated_at)?,
        })
    }

    pub fn into_domain(self) -> Result<Project, PersistenceError> {
        let required_members: u32 = u32::try_from(self.required_members).map_err(|_| {
            PersistenceError::ReconstructionError(format!(
                "negative required_members {} on project {}",
                self.required_members, self.id
            ))
        })?;

        Ok(Project {
            required_members,
            is_active: self.is_active != 0,
            created_at: decode_timestamp(&self.created_at)?,
            updated_at: decode_timestamp(&self.updated_at)?,
            id: self.id,
            name: self.name,
            description: self.description,
            color: self.color,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = optimization_suggestions)]
pub struct SuggestionRow {
    pub id: String,
    pub month: String,
    pub status: String,
    pub summary: String,
    pub created_by: String,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub created_at: String,
}

impl SuggestionRow {
    pub fn from_domain(suggestion: &OptimizationSuggestion) -> Result<Self, PersistenceError> {
        Ok(Self {
            id: suggestion.id.clone(),
            month: suggestion.month.to_string(),
            status: suggestion.status.as_str().to_string(),
            summary: serde_json::to_string(&suggestion.summary)?,
            created_by: suggestion.created_by.clone(),
            approved_by: suggestion.approved_by.clone(),
            approved_at: encode_optional_timestamp(suggestion.approved_at)?,
            created_at: encode_timestamp(suggestion.created_at)?,
        })
    }

    pub fn into_domain(self) -> Result<OptimizationSuggestion, PersistenceError> {
        let summary: OptimizationSummary = serde_json::from_str(&self.summary)?;
        Ok(OptimizationSuggestion {
            month: self.month.parse().map_err(reconstruction)?,
            status: self.status.parse().map_err(reconstruction)?,
            summary,
            approved_at: decode_optional_timestamp(self.approved_at.as_deref())?,
            created_at: decode_timestamp(&self.created_at)?,
            id: self.id,
            created_by: self.created_by,
            approved_by: self.approved_by,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = optimization_assignments)]
pub struct AssignmentRow {
    pub id: String,
    pub suggestion_id: String,
    pub user_id: String,
    pub project_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl AssignmentRow {
    pub fn from_domain(assignment: &OptimizationAssignment) -> Self {
        Self {
            id: assignment.id.clone(),
            suggestion_id: assignment.suggestion_id.clone(),
            user_id: assignment.user_id.clone(),
            project_id: assignment.project_id.clone(),
            date: format_date(assignment.date),
            start_time: format_wall_clock(assignment.range.start()),
            end_time: format_wall_clock(assignment.range.end()),
        }
    }

    pub fn into_domain(self) -> Result<OptimizationAssignment, PersistenceError> {
        Ok(OptimizationAssignment {
            date: parse_date(&self.date).map_err(reconstruction)?,
            range: decode_range(&self.start_time, &self.end_time)?,
            id: self.id,
            suggestion_id: self.suggestion_id,
            user_id: self.user_id,
            project_id: self.project_id,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = confirmed_shifts)]
pub struct ConfirmedShiftRow {
    pub id: String,
    pub user_id: String,
    pub project_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub calendar_event_id: Option<String>,
    pub comment: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ConfirmedShiftRow {
    pub fn from_domain(shift: &ConfirmedShift) -> Result<Self, PersistenceError> {
        Ok(Self {
            id: shift.id.clone(),
            user_id: shift.user_id.clone(),
            project_id: shift.project_id.clone(),
            date: format_date(shift.date),
            start_time: format_wall_clock(shift.range.start()),
            end_time: format_wall_clock(shift.range.end()),
            calendar_event_id: shift.calendar_event_id.clone(),
            comment: shift.comment.clone(),
            created_by: shift.created_by.clone(),
            created_at: encode_timestamp(shift.created_at)?,
            updated_at: encode_timestamp(shift.updated_at)?,
        })
    }

    pub fn into_domain(self) -> Result<ConfirmedShift, PersistenceError> {
        Ok(ConfirmedShift {
            date: parse_date(&self.date).map_err(reconstruction)?,
            range: decode_range(&self.start_time, &self.end_time)?,
            created_at: decode_timestamp(&self.created_at)?,
            updated_at: decode_timestamp(&self.updated_at)?,
            id: self.id,
            user_id: self.user_id,
            project_id: self.project_id,
            calendar_event_id: self.calendar_event_id,
            comment: self.comment,
            created_by: self.created_by,
        })
    }
}
