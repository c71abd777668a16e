// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Each function authorizes the caller, validates the request, calls into
//! the core and persistence layers, and returns a response DTO. The two
//! operations that wait on an external service (`optimize` and
//! `sync_confirmed_shift`) take the shared store lock only around their
//! reads and writes, never across the external call.

use chrono_tz::Tz;
use sifut::{
    ApprovalPlan, CalendarEvent, CalendarEventRef, CalendarGateway, OptimizationOracle,
    OptimizationTask, OracleResponse, SuggestionPlan, plan_suggestion, request_optimization,
};
use sifut_domain::{
    ConfirmedShift, Month, OptimizationAssignment, OptimizationSuggestion, Project, ShiftRequest,
    ShiftRequestPatch, ShiftRequestStatus, TimeRange, parse_date, parse_wall_clock,
    validate_project_fields,
};
use sifut_persistence::{
    ConfirmedShiftFilter, Persistence, PersistenceError, ShiftRequestFilter,
};
use time::{Date, OffsetDateTime, Time};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    ApproveSuggestionResponse, AssignmentInfo, ConfirmedShiftInfo, CreateConfirmedShiftRequest,
    CreateProjectRequest, CreateShiftRequestRequest, DeleteResponse, ListConfirmedShiftsQuery,
    ListProjectsQuery, ListShiftRequestsQuery, ListSuggestionsQuery, OptimizeRequest,
    ProjectInfo, RejectSuggestionResponse, SetProjectActiveRequest, ShiftRequestInfo,
    SuggestionDetail, SuggestionInfo, SyncConfirmedShiftRequest, SyncConfirmedShiftResponse,
    UpdateShiftRequestRequest,
};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn parse_month(value: &str) -> Result<Month, ApiError> {
    value.parse().map_err(translate_domain_error)
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value
        .map(|v| parse_date(v).map_err(translate_domain_error))
        .transpose()
}

fn parse_optional_time(value: Option<&str>) -> Result<Option<Time>, ApiError> {
    value
        .map(|v| parse_wall_clock(v).map_err(translate_domain_error))
        .transpose()
}

fn parse_range(start: &str, end: &str) -> Result<TimeRange, ApiError> {
    let start: Time = parse_wall_clock(start).map_err(translate_domain_error)?;
    let end: Time = parse_wall_clock(end).map_err(translate_domain_error)?;
    TimeRange::new(start, end).map_err(translate_domain_error)
}

fn suggestion_detail(
    suggestion: &OptimizationSuggestion,
    assignments: &[OptimizationAssignment],
) -> SuggestionDetail {
    SuggestionDetail {
        suggestion: SuggestionInfo::from(suggestion),
        assignments: assignments.iter().map(AssignmentInfo::from).collect(),
    }
}

/// Maps a missing-row error to a typed not-found for `resource_type`.
fn or_not_found(
    resource_type: &'static str,
    id: &str,
) -> impl FnOnce(PersistenceError) -> ApiError {
    move |err| match err {
        PersistenceError::NotFound(_) => ApiError::not_found(resource_type, id),
        other => translate_persistence_error(other),
    }
}

// ============================================================================
// Optimization and suggestions
// ============================================================================

/// Runs the optimization workflow for one month.
///
/// Loads the month's submitted shift requests and the active projects,
/// asks the oracle for a schedule, validates the reply and stores it as a
/// `pending` suggestion. The store lock is released while the oracle works.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an administrator
/// - The month is malformed
/// - There are no submitted requests or no active projects (`NoData`)
/// - The oracle call fails or its reply holds no JSON (`OptimizationFailed`)
/// - The reply has the wrong shape (`OracleContract`)
/// - Storing the suggestion fails
pub async fn optimize(
    persistence: &Mutex<Persistence>,
    oracle: &dyn OptimizationOracle,
    request: &OptimizeRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<SuggestionDetail, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "optimize")?;
    let month: Month = parse_month(&request.month)?;

    let (shift_requests, projects): (Vec<ShiftRequest>, Vec<Project>) = {
        let mut persistence = persistence.lock().await;
        let shift_requests: Vec<ShiftRequest> = persistence
            .list_submitted_in_month(month)
            .map_err(translate_persistence_error)?;
        let projects: Vec<Project> = persistence
            .list_projects(true)
            .map_err(translate_persistence_error)?;
        (shift_requests, projects)
    };

    let task: OptimizationTask =
        OptimizationTask::new(month, &projects, &shift_requests).map_err(|err| {
            info!(month = %month, reason = %err, "Nothing to optimize");
            translate_core_error(err)
        })?;

    let response: OracleResponse = request_optimization(oracle, &task)
        .await
        .map_err(translate_core_error)?;

    let plan: SuggestionPlan = plan_suggestion(
        &task,
        response,
        &authenticated_actor.id,
        OffsetDateTime::now_utc(),
    );
    persistence
        .lock()
        .await
        .persist_suggestion(&plan)
        .map_err(translate_persistence_error)?;

    Ok(suggestion_detail(&plan.suggestion, &plan.assignments))
}

/// Lists suggestions newest first, optionally for one month.
///
/// Any authenticated caller may read the ledger.
///
/// # Errors
///
/// Returns an error if the month filter is malformed or the query fails.
pub fn list_suggestions(
    persistence: &mut Persistence,
    query: &ListSuggestionsQuery,
    _authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<SuggestionInfo>, ApiError> {
    let month: Option<Month> = query.month.as_deref().map(parse_month).transpose()?;
    let suggestions: Vec<OptimizationSuggestion> = persistence
        .list_suggestions(month)
        .map_err(translate_persistence_error)?;
    Ok(suggestions.iter().map(SuggestionInfo::from).collect())
}

/// Retrieves one suggestion with its assignments.
///
/// # Errors
///
/// Returns an error if the suggestion does not exist or the query fails.
pub fn get_suggestion(
    persistence: &mut Persistence,
    suggestion_id: &str,
    _authenticated_actor: &AuthenticatedActor,
) -> Result<SuggestionDetail, ApiError> {
    let suggestion: OptimizationSuggestion = persistence
        .get_suggestion(suggestion_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Suggestion", suggestion_id))?;
    let assignments: Vec<OptimizationAssignment> = persistence
        .list_assignments(suggestion_id)
        .map_err(translate_persistence_error)?;
    Ok(suggestion_detail(&suggestion, &assignments))
}

/// Approves a suggestion, creating one confirmed shift per assignment.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an administrator
/// - The suggestion does not exist
/// - The suggestion is already approved (`AlreadyApproved`)
/// - The suggestion was rejected (`InvalidTransition`)
/// - The write fails, in which case nothing was changed
pub fn approve_suggestion(
    persistence: &mut Persistence,
    suggestion_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApproveSuggestionResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "approve_suggestion")?;

    let plan: ApprovalPlan = persistence
        .approve_suggestion(
            suggestion_id,
            &authenticated_actor.id,
            OffsetDateTime::now_utc(),
        )
        .map_err(or_not_found("Suggestion", suggestion_id))?;

    Ok(ApproveSuggestionResponse {
        suggestion_id: suggestion_id.to_string(),
        confirmed_shifts: plan.confirmed_shifts.len(),
        message: String::from("Optimization approved successfully"),
    })
}

/// Rejects a pending suggestion.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator, the suggestion
/// does not exist, or it is no longer pending.
pub fn reject_suggestion(
    persistence: &mut Persistence,
    suggestion_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<RejectSuggestionResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "reject_suggestion")?;

    let rejected: OptimizationSuggestion = persistence
        .reject_suggestion(suggestion_id)
        .map_err(or_not_found("Suggestion", suggestion_id))?;

    Ok(RejectSuggestionResponse {
        suggestion: SuggestionInfo::from(&rejected),
        message: String::from("Optimization rejected"),
    })
}

/// Deletes a suggestion and its assignments.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator or the suggestion
/// does not exist.
pub fn delete_suggestion(
    persistence: &mut Persistence,
    suggestion_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DeleteResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "delete_suggestion")?;

    if !persistence
        .delete_suggestion(suggestion_id)
        .map_err(translate_persistence_error)?
    {
        return Err(ApiError::not_found("Suggestion", suggestion_id));
    }
    Ok(DeleteResponse {
        id: suggestion_id.to_string(),
        message: String::from("Suggestion deleted"),
    })
}

// ============================================================================
// Shift requests
// ============================================================================

fn load_shift_request(
    persistence: &mut Persistence,
    shift_request_id: &str,
) -> Result<ShiftRequest, ApiError> {
    persistence
        .get_shift_request(shift_request_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Shift request", shift_request_id))
}

/// Records the caller's availability as a new draft.
///
/// # Errors
///
/// Returns an error if the date or times are malformed, the end is not
/// after the start, or the insert fails.
pub fn create_shift_request(
    persistence: &mut Persistence,
    request: &CreateShiftRequestRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ShiftRequestInfo, ApiError> {
    let date: Date = parse_date(&request.date).map_err(translate_domain_error)?;
    let range: TimeRange = parse_range(&request.start_time, &request.end_time)?;

    let shift_request: ShiftRequest = ShiftRequest::new_draft(
        new_id(),
        authenticated_actor.id.clone(),
        date,
        range,
        request.comment.clone(),
        OffsetDateTime::now_utc(),
    );
    persistence
        .create_shift_request(&shift_request)
        .map_err(translate_persistence_error)?;

    Ok(ShiftRequestInfo::from(&shift_request))
}

/// Lists the caller's own shift requests by date then start time.
///
/// # Errors
///
/// Returns an error if a filter is malformed or the query fails.
pub fn list_shift_requests(
    persistence: &mut Persistence,
    query: &ListShiftRequestsQuery,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<ShiftRequestInfo>, ApiError> {
    let status: Option<ShiftRequestStatus> = query
        .status
        .as_deref()
        .map(|s| s.parse().map_err(translate_domain_error))
        .transpose()?;

    let filter: ShiftRequestFilter = ShiftRequestFilter {
        user_id: Some(authenticated_actor.id.clone()),
        start_date: parse_optional_date(query.start_date.as_deref())?,
        end_date: parse_optional_date(query.end_date.as_deref())?,
        status,
    };
    let requests: Vec<ShiftRequest> = persistence
        .list_shift_requests(&filter)
        .map_err(translate_persistence_error)?;
    Ok(requests.iter().map(ShiftRequestInfo::from).collect())
}

/// Retrieves a shift request. Visible to its owner and to administrators.
///
/// # Errors
///
/// Returns an error if it does not exist or the caller may not see it.
pub fn get_shift_request(
    persistence: &mut Persistence,
    shift_request_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ShiftRequestInfo, ApiError> {
    let request: ShiftRequest = load_shift_request(persistence, shift_request_id)?;
    AuthorizationService::authorize_owner_or_admin(
        authenticated_actor,
        &request.user_id,
        "get_shift_request",
    )?;
    Ok(ShiftRequestInfo::from(&request))
}

/// Edits the caller's draft shift request.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not exist
/// - The caller is not the owner
/// - The request is no longer a draft
/// - A field is malformed or the merged range is invalid
pub fn update_shift_request(
    persistence: &mut Persistence,
    shift_request_id: &str,
    request: &UpdateShiftRequestRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ShiftRequestInfo, ApiError> {
    let current: ShiftRequest = load_shift_request(persistence, shift_request_id)?;
    AuthorizationService::authorize_owner(
        authenticated_actor,
        &current.user_id,
        "update_shift_request",
    )?;

    let patch: ShiftRequestPatch = ShiftRequestPatch {
        date: parse_optional_date(request.date.as_deref())?,
        start_time: parse_optional_time(request.start_time.as_deref())?,
        end_time: parse_optional_time(request.end_time.as_deref())?,
        comment: request.comment.clone(),
    };
    let updated: ShiftRequest = current
        .apply_patch(patch, OffsetDateTime::now_utc())
        .map_err(translate_domain_error)?;
    persistence
        .update_shift_request(&updated)
        .map_err(or_not_found("Shift request", shift_request_id))?;

    Ok(ShiftRequestInfo::from(&updated))
}

/// Submits the caller's draft for scheduling.
///
/// # Errors
///
/// Returns an error if the request does not exist, the caller is not the
/// owner, or the request is not a draft.
pub fn submit_shift_request(
    persistence: &mut Persistence,
    shift_request_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ShiftRequestInfo, ApiError> {
    let current: ShiftRequest = load_shift_request(persistence, shift_request_id)?;
    AuthorizationService::authorize_owner(
        authenticated_actor,
        &current.user_id,
        "submit_shift_request",
    )?;

    let submitted: ShiftRequest = current
        .submit(OffsetDateTime::now_utc())
        .map_err(translate_domain_error)?;
    persistence
        .update_shift_request(&submitted)
        .map_err(or_not_found("Shift request", shift_request_id))?;

    info!(shift_request_id, user_id = %submitted.user_id, "Submitted shift request");
    Ok(ShiftRequestInfo::from(&submitted))
}

/// Deletes the caller's draft shift request.
///
/// # Errors
///
/// Returns an error if the request does not exist, the caller is not the
/// owner, or the request is not a draft.
pub fn delete_shift_request(
    persistence: &mut Persistence,
    shift_request_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DeleteResponse, ApiError> {
    let current: ShiftRequest = load_shift_request(persistence, shift_request_id)?;
    AuthorizationService::authorize_owner(
        authenticated_actor,
        &current.user_id,
        "delete_shift_request",
    )?;
    current.ensure_deletable().map_err(translate_domain_error)?;

    if !persistence
        .delete_shift_request(shift_request_id)
        .map_err(translate_persistence_error)?
    {
        return Err(ApiError::not_found("Shift request", shift_request_id));
    }
    Ok(DeleteResponse {
        id: shift_request_id.to_string(),
        message: String::from("Shift request deleted"),
    })
}

// ============================================================================
// Projects
// ============================================================================

/// Creates an active project.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator, the name is empty
/// or too long, the headcount is below 1, or the insert fails.
pub fn create_project(
    persistence: &mut Persistence,
    request: &CreateProjectRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ProjectInfo, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "create_project")?;
    let required_members: u32 = validate_project_fields(&request.name, request.required_members)
        .map_err(translate_domain_error)?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let project: Project = Project {
        id: new_id(),
        name: request.name.trim().to_string(),
        description: request.description.clone(),
        required_members,
        color: request.color.clone(),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    persistence
        .create_project(&project)
        .map_err(translate_persistence_error)?;

    Ok(ProjectInfo::from(&project))
}

/// Lists projects by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_projects(
    persistence: &mut Persistence,
    query: &ListProjectsQuery,
    _authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<ProjectInfo>, ApiError> {
    let projects: Vec<Project> = persistence
        .list_projects(query.active_only)
        .map_err(translate_persistence_error)?;
    Ok(projects.iter().map(ProjectInfo::from).collect())
}

/// Activates or deactivates a project.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator or the project
/// does not exist.
pub fn set_project_active(
    persistence: &mut Persistence,
    project_id: &str,
    request: &SetProjectActiveRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ProjectInfo, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "set_project_active")?;

    let project: Project = persistence
        .set_project_active(project_id, request.is_active, OffsetDateTime::now_utc())
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Project", project_id))?;
    Ok(ProjectInfo::from(&project))
}

/// Deletes a project with its assignments and confirmed shifts.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator or the project
/// does not exist.
pub fn delete_project(
    persistence: &mut Persistence,
    project_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DeleteResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "delete_project")?;

    if !persistence
        .delete_project(project_id)
        .map_err(translate_persistence_error)?
    {
        return Err(ApiError::not_found("Project", project_id));
    }
    Ok(DeleteResponse {
        id: project_id.to_string(),
        message: String::from("Project deleted"),
    })
}

// ============================================================================
// Confirmed shifts
// ============================================================================

/// Confirms a shift directly, outside the optimization flow.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator, the project does
/// not exist, a field is malformed, or the insert fails.
pub fn create_confirmed_shift(
    persistence: &mut Persistence,
    request: &CreateConfirmedShiftRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ConfirmedShiftInfo, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "create_confirmed_shift")?;

    if request.user_id.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("user_id"),
            message: String::from("Member cannot be empty"),
        });
    }
    let date: Date = parse_date(&request.date).map_err(translate_domain_error)?;
    let range: TimeRange = parse_range(&request.start_time, &request.end_time)?;
    persistence
        .get_project(&request.project_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Project", &request.project_id))?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let shift: ConfirmedShift = ConfirmedShift {
        id: new_id(),
        user_id: request.user_id.clone(),
        project_id: request.project_id.clone(),
        date,
        range,
        calendar_event_id: None,
        comment: request.comment.clone(),
        created_by: authenticated_actor.id.clone(),
        created_at: now,
        updated_at: now,
    };
    persistence
        .create_confirmed_shift(&shift)
        .map_err(translate_persistence_error)?;

    Ok(ConfirmedShiftInfo::from(&shift))
}

/// Lists confirmed shifts by date then start time.
///
/// Administrators see every member and may filter by one. Members only
/// ever see their own shifts.
///
/// # Errors
///
/// Returns an error if a date filter is malformed or the query fails.
pub fn list_confirmed_shifts(
    persistence: &mut Persistence,
    query: &ListConfirmedShiftsQuery,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Vec<ConfirmedShiftInfo>, ApiError> {
    let user_id: Option<String> = if authenticated_actor.is_admin() {
        query.user_id.clone()
    } else {
        Some(authenticated_actor.id.clone())
    };

    let filter: ConfirmedShiftFilter = ConfirmedShiftFilter {
        user_id,
        project_id: query.project_id.clone(),
        start_date: parse_optional_date(query.start_date.as_deref())?,
        end_date: parse_optional_date(query.end_date.as_deref())?,
    };
    let shifts: Vec<ConfirmedShift> = persistence
        .list_confirmed_shifts(&filter)
        .map_err(translate_persistence_error)?;
    Ok(shifts.iter().map(ConfirmedShiftInfo::from).collect())
}

/// Deletes a confirmed shift.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator or the shift does
/// not exist.
pub fn delete_confirmed_shift(
    persistence: &mut Persistence,
    shift_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DeleteResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "delete_confirmed_shift")?;

    if !persistence
        .delete_confirmed_shift(shift_id)
        .map_err(translate_persistence_error)?
    {
        return Err(ApiError::not_found("Confirmed shift", shift_id));
    }
    Ok(DeleteResponse {
        id: shift_id.to_string(),
        message: String::from("Confirmed shift deleted"),
    })
}

fn not_synced(shift_id: &str, message: String) -> SyncConfirmedShiftResponse {
    SyncConfirmedShiftResponse {
        shift_id: shift_id.to_string(),
        synced: false,
        calendar_event_id: None,
        html_link: None,
        message,
    }
}

/// Mirrors a confirmed shift into the external calendar.
///
/// Best effort: a calendar failure is logged and reported as
/// `synced: false`, and the shift is left as it was. A shift that already
/// carries an event ID is not pushed again.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator, the shift or its
/// project does not exist, the shift's times cannot be placed in
/// `time_zone`, or recording the event ID fails.
pub async fn sync_confirmed_shift(
    persistence: &Mutex<Persistence>,
    calendar: Option<&dyn CalendarGateway>,
    time_zone: Tz,
    shift_id: &str,
    request: &SyncConfirmedShiftRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<SyncConfirmedShiftResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "sync_confirmed_shift")?;

    let (shift, project): (ConfirmedShift, Project) = {
        let mut persistence = persistence.lock().await;
        let shift: ConfirmedShift = persistence
            .get_confirmed_shift(shift_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::not_found("Confirmed shift", shift_id))?;
        let project: Project = persistence
            .get_project(&shift.project_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::not_found("Project", &shift.project_id))?;
        (shift, project)
    };

    if let Some(event_id) = &shift.calendar_event_id {
        return Ok(SyncConfirmedShiftResponse {
            shift_id: shift_id.to_string(),
            synced: true,
            calendar_event_id: Some(event_id.clone()),
            html_link: None,
            message: String::from("Shift is already synced"),
        });
    }

    let Some(calendar) = calendar else {
        warn!(shift_id, "Calendar sync requested but no calendar is configured");
        return Ok(not_synced(
            shift_id,
            String::from("Calendar is not configured"),
        ));
    };

    let event: CalendarEvent = CalendarEvent::for_confirmed_shift(
        &shift,
        &project,
        time_zone,
        request.attendees.clone(),
    )
    .map_err(translate_core_error)?;

    let created: CalendarEventRef = match calendar.create_shift_event(&event).await {
        Ok(created) => created,
        Err(failure) => {
            warn!(shift_id, error = %failure, "Calendar sync failed; shift left unsynced");
            return Ok(not_synced(
                shift_id,
                format!("Calendar sync failed: {failure}"),
            ));
        }
    };

    persistence
        .lock()
        .await
        .set_calendar_event_id(shift_id, &created.event_id, OffsetDateTime::now_utc())
        .map_err(or_not_found("Confirmed shift", shift_id))?;

    info!(shift_id, event_id = %created.event_id, "Synced confirmed shift to calendar");
    Ok(SyncConfirmedShiftResponse {
        shift_id: shift_id.to_string(),
        synced: true,
        calendar_event_id: Some(created.event_id),
        html_link: created.html_link,
        message: String::from("Shift synced to calendar"),
    })
}

/// Removes a confirmed shift's event from the external calendar.
///
/// Best effort like [`sync_confirmed_shift`]: when the calendar is missing
/// or refuses the delete, the shift keeps its event ID and the response
/// reports `synced: true`. A shift with no event ID is left alone.
///
/// # Errors
///
/// Returns an error if the actor is not an administrator, the shift does not
/// exist, or clearing the event ID fails.
pub async fn unsync_confirmed_shift(
    persistence: &Mutex<Persistence>,
    calendar: Option<&dyn CalendarGateway>,
    shift_id: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<SyncConfirmedShiftResponse, ApiError> {
    AuthorizationService::authorize_admin(authenticated_actor, "unsync_confirmed_shift")?;

    let shift: ConfirmedShift = persistence
        .lock()
        .await
        .get_confirmed_shift(shift_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Confirmed shift", shift_id))?;

    let Some(event_id) = shift.calendar_event_id else {
        return Ok(not_synced(shift_id, String::from("Shift is not synced")));
    };

    let still_synced = |message: String| SyncConfirmedShiftResponse {
        shift_id: shift_id.to_string(),
        synced: true,
        calendar_event_id: Some(event_id.clone()),
        html_link: None,
        message,
    };

    let Some(calendar) = calendar else {
        warn!(shift_id, "Calendar removal requested but no calendar is configured");
        return Ok(still_synced(String::from("Calendar is not configured")));
    };

    if let Err(failure) = calendar.delete_event(&event_id).await {
        warn!(
            shift_id,
            event_id = %event_id,
            error = %failure,
            "Calendar removal failed; shift left synced"
        );
        return Ok(still_synced(format!("Calendar removal failed: {failure}")));
    }

    persistence
        .lock()
        .await
        .clear_calendar_event_id(shift_id, OffsetDateTime::now_utc())
        .map_err(or_not_found("Confirmed shift", shift_id))?;

    info!(shift_id, event_id = %event_id, "Removed confirmed shift from calendar");
    Ok(not_synced(shift_id, String::from("Shift removed from calendar")))
}
