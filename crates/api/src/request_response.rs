// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as `YYYY-MM-DD`, times as `HH:MM` or `HH:MM:SS` on input
//! and `HH:MM:SS` on output, timestamps as UTC RFC 3339.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sifut_domain::{
    ConfirmedShift, OptimizationAssignment, OptimizationSuggestion, OptimizationSummary, Project,
    ShiftRequest, format_date, format_timestamp, format_wall_clock,
};

// ============================================================================
// Optimization and suggestions
// ============================================================================

/// API request to run an optimization for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    /// The month to schedule (`YYYY-MM`).
    pub month: String,
}

/// Query parameters for listing suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSuggestionsQuery {
    /// Only suggestions for this month (`YYYY-MM`).
    pub month: Option<String>,
}

/// The oracle's summary with missing well-known fields defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryInfo {
    pub total_shifts: u64,
    pub members_utilized: u64,
    pub coverage_rate: f64,
    pub notes: Vec<String>,
    /// Any other keys the oracle returned, verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&OptimizationSummary> for SummaryInfo {
    fn from(summary: &OptimizationSummary) -> Self {
        let extra: Map<String, Value> = summary
            .fields()
            .iter()
            .filter(|(key, _)| {
                !matches!(
                    key.as_str(),
                    "total_shifts" | "members_utilized" | "coverage_rate" | "notes"
                )
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            total_shifts: summary.total_shifts().unwrap_or(0),
            members_utilized: summary.members_utilized().unwrap_or(0),
            coverage_rate: summary.coverage_rate().unwrap_or(0.0),
            notes: summary.notes().into_iter().map(String::from).collect(),
            extra,
        }
    }
}

/// A suggestion as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionInfo {
    pub id: String,
    pub month: String,
    pub status: String,
    pub summary: SummaryInfo,
    pub created_by: String,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub created_at: String,
}

impl From<&OptimizationSuggestion> for SuggestionInfo {
    fn from(suggestion: &OptimizationSuggestion) -> Self {
        Self {
            id: suggestion.id.clone(),
            month: suggestion.month.to_string(),
            status: suggestion.status.to_string(),
            summary: SummaryInfo::from(&suggestion.summary),
            created_by: suggestion.created_by.clone(),
            approved_by: suggestion.approved_by.clone(),
            approved_at: suggestion.approved_at.map(format_timestamp),
            created_at: format_timestamp(suggestion.created_at),
        }
    }
}

/// One proposed assignment as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInfo {
    pub id: String,
    pub user_id: String,
    pub project_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<&OptimizationAssignment> for AssignmentInfo {
    fn from(assignment: &OptimizationAssignment) -> Self {
        Self {
            id: assignment.id.clone(),
            user_id: assignment.user_id.clone(),
            project_id: assignment.project_id.clone(),
            date: format_date(assignment.date),
            start_time: format_wall_clock(assignment.range.start()),
            end_time: format_wall_clock(assignment.range.end()),
        }
    }
}

/// A suggestion together with its assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionDetail {
    pub suggestion: SuggestionInfo,
    pub assignments: Vec<AssignmentInfo>,
}

/// API response for a successful approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveSuggestionResponse {
    pub suggestion_id: String,
    /// The number of confirmed shifts created.
    pub confirmed_shifts: usize,
    /// A success message.
    pub message: String,
}

/// API response for a successful rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectSuggestionResponse {
    pub suggestion: SuggestionInfo,
    pub message: String,
}

// ============================================================================
// Shift requests
// ============================================================================

/// API request to record availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShiftRequestRequest {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub comment: Option<String>,
}

/// API request to edit a draft shift request. Absent fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateShiftRequestRequest {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub comment: Option<String>,
}

/// Query parameters for listing the caller's shift requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListShiftRequestsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

/// A shift request as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequestInfo {
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

impl From<&ShiftRequest> for ShiftRequestInfo {
    fn from(request: &ShiftRequest) -> Self {
        Self {
            id: request.id.clone(),
            user_id: request.user_id.clone(),
            date: format_date(request.date),
            start_time: format_wall_clock(request.range.start()),
            end_time: format_wall_clock(request.range.end()),
            comment: request.comment.clone(),
            status: request.status.to_string(),
            submitted_at: request.submitted_at.map(format_timestamp),
            created_at: format_timestamp(request.created_at),
            updated_at: format_timestamp(request.updated_at),
        }
    }
}

// ============================================================================
// Projects
// ============================================================================

/// API request to create a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
    /// Members needed per staffed slot. Must be at least 1.
    pub required_members: i64,
    /// Display color (`#RRGGBB`).
    pub color: Option<String>,
}

/// Query parameters for listing projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProjectsQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// API request to activate or deactivate a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetProjectActiveRequest {
    pub is_active: bool,
}

/// A project as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub required_members: u32,
    pub color: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Project> for ProjectInfo {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            required_members: project.required_members,
            color: project.color.clone(),
            is_active: project.is_active,
            created_at: format_timestamp(project.created_at),
            updated_at: format_timestamp(project.updated_at),
        }
    }
}

// ============================================================================
// Confirmed shifts
// ============================================================================

/// API request to confirm a shift directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateConfirmedShiftRequest {
    pub user_id: String,
    pub project_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub comment: Option<String>,
}

/// Query parameters for listing confirmed shifts.
///
/// `user_id` is honored for administrators only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfirmedShiftsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub user_id: Option<String>,
    pub project_id: Option<String>,
}

/// API request to mirror a confirmed shift into the calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfirmedShiftRequest {
    /// Attendee email addresses.
    #[serde(default)]
    pub attendees: Vec<String>,
}

/// A confirmed shift as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedShiftInfo {
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

impl From<&ConfirmedShift> for ConfirmedShiftInfo {
    fn from(shift: &ConfirmedShift) -> Self {
        Self {
            id: shift.id.clone(),
            user_id: shift.user_id.clone(),
            project_id: shift.project_id.clone(),
            date: format_date(shift.date),
            start_time: format_wall_clock(shift.range.start()),
            end_time: format_wall_clock(shift.range.end()),
            calendar_event_id: shift.calendar_event_id.clone(),
            comment: shift.comment.clone(),
            created_by: shift.created_by.clone(),
            created_at: format_timestamp(shift.created_at),
            updated_at: format_timestamp(shift.updated_at),
        }
    }
}

/// API response for a calendar sync attempt.
///
/// A failed sync is reported here rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfirmedShiftResponse {
    pub shift_id: String,
    pub synced: bool,
    pub calendar_event_id: Option<String>,
    pub html_link: Option<String>,
    pub message: String,
}

// ============================================================================
// Shared
// ============================================================================

/// API response for a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: String,
    pub message: String,
}
