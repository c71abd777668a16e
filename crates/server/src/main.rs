// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono_tz::Tz;
use clap::Parser;
use serde::{Deserialize, Serialize};
use sifut::{CalendarGateway, OptimizationOracle};
use sifut_api::{
    ApiError, ApproveSuggestionResponse, ConfirmedShiftInfo, CreateConfirmedShiftRequest,
    CreateProjectRequest, CreateShiftRequestRequest, DeleteResponse, ListConfirmedShiftsQuery,
    ListProjectsQuery, ListShiftRequestsQuery, ListSuggestionsQuery, OptimizeRequest, ProjectInfo,
    RejectSuggestionResponse, SetProjectActiveRequest, ShiftRequestInfo, SuggestionDetail,
    SuggestionInfo, SyncConfirmedShiftRequest, SyncConfirmedShiftResponse,
    UpdateShiftRequestRequest,
};
use sifut_domain::parse_timezone;
use sifut_integrations::{
    DEFAULT_CLAUDE_MODEL, DEFAULT_GEMINI_MODEL, DEFAULT_OPENAI_MODEL, OracleConfig,
    OracleProvider, build_calendar, build_oracle,
};
use sifut_persistence::Persistence;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::session::CallerIdentity;

/// SIFUT Server - HTTP server for the SIFUT shift optimization backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "DATABASE_PATH")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, env = "BIND_ADDRESS", default_value = "127.0.0.1")]
    bind: String,

    /// LLM provider used for optimization (claude, openai or gemini)
    #[arg(long, env = "AI_PROVIDER", default_value = "claude")]
    ai_provider: String,

    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    anthropic_api_key: Option<String>,

    #[arg(long, env = "ANTHROPIC_MODEL", default_value = DEFAULT_CLAUDE_MODEL)]
    anthropic_model: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    openai_model: String,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    /// Deadline for one optimization call, in seconds
    #[arg(long, env = "ORACLE_TIMEOUT_SECS", default_value_t = 120)]
    oracle_timeout_secs: u64,

    /// Google Calendar access token. Calendar sync is disabled without it.
    #[arg(long, env = "CALENDAR_ACCESS_TOKEN", hide_env_values = true)]
    calendar_access_token: Option<String>,

    /// IANA time zone that shift times are interpreted in for calendar events
    #[arg(long, env = "CALENDAR_TIME_ZONE", default_value = "Asia/Tokyo")]
    calendar_time_zone: String,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the external collaborators chosen at startup.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    oracle: Arc<dyn OptimizationOracle>,
    /// `None` when no calendar is configured.
    calendar: Option<Arc<dyn CalendarGateway>>,
    time_zone: Tz,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Stable machine-readable error kind.
    kind: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    kind: &'static str,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            kind: self.kind.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            ApiError::NoData { .. }
            | ApiError::AlreadyApproved { .. }
            | ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::OptimizationFailed { .. } | ApiError::OracleContract { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Optimization and suggestions
// ============================================================================

/// Handler for POST `/optimize` endpoint.
///
/// Runs the optimization for one month and stores the result as a pending
/// suggestion.
async fn handle_optimize(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Json(req): Json<OptimizeRequest>,
) -> Result<(StatusCode, Json<SuggestionDetail>), HttpError> {
    info!(
        actor_id = %actor.id,
        month = %req.month,
        provider = app_state.oracle.provider_name(),
        "Handling optimize request"
    );

    let detail: SuggestionDetail = sifut_api::optimize(
        &app_state.persistence,
        app_state.oracle.as_ref(),
        &req,
        &actor,
    )
    .await?;

    info!(
        suggestion_id = %detail.suggestion.id,
        assignments = detail.assignments.len(),
        "Stored optimization suggestion"
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

/// Handler for GET `/suggestions` endpoint.
async fn handle_list_suggestions(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Query(query): Query<ListSuggestionsQuery>,
) -> Result<Json<Vec<SuggestionInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let suggestions: Vec<SuggestionInfo> =
        sifut_api::list_suggestions(&mut persistence, &query, &actor)?;
    drop(persistence);

    Ok(Json(suggestions))
}

/// Handler for GET `/suggestions/{id}` endpoint.
async fn handle_get_suggestion(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(suggestion_id): Path<String>,
) -> Result<Json<SuggestionDetail>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: SuggestionDetail =
        sifut_api::get_suggestion(&mut persistence, &suggestion_id, &actor)?;
    drop(persistence);

    Ok(Json(detail))
}

/// Handler for POST `/suggestions/{id}/approve` endpoint.
///
/// Materializes every assignment of the suggestion as a confirmed shift.
async fn handle_approve_suggestion(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(suggestion_id): Path<String>,
) -> Result<Json<ApproveSuggestionResponse>, HttpError> {
    info!(actor_id = %actor.id, suggestion_id = %suggestion_id, "Handling approve request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ApproveSuggestionResponse =
        sifut_api::approve_suggestion(&mut persistence, &suggestion_id, &actor)?;
    drop(persistence);

    info!(
        suggestion_id = %suggestion_id,
        confirmed_shifts = response.confirmed_shifts,
        "Approved suggestion"
    );
    Ok(Json(response))
}

/// Handler for POST `/suggestions/{id}/reject` endpoint.
async fn handle_reject_suggestion(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(suggestion_id): Path<String>,
) -> Result<Json<RejectSuggestionResponse>, HttpError> {
    info!(actor_id = %actor.id, suggestion_id = %suggestion_id, "Handling reject request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RejectSuggestionResponse =
        sifut_api::reject_suggestion(&mut persistence, &suggestion_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/suggestions/{id}` endpoint.
async fn handle_delete_suggestion(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(suggestion_id): Path<String>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = %actor.id, suggestion_id = %suggestion_id, "Handling delete_suggestion request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse =
        sifut_api::delete_suggestion(&mut persistence, &suggestion_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Shift requests
// ============================================================================

/// Handler for POST `/shift_requests` endpoint.
async fn handle_create_shift_request(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Json(req): Json<CreateShiftRequestRequest>,
) -> Result<(StatusCode, Json<ShiftRequestInfo>), HttpError> {
    info!(actor_id = %actor.id, date = %req.date, "Handling create_shift_request request");

    let mut persistence = app_state.persistence.lock().await;
    let created: ShiftRequestInfo =
        sifut_api::create_shift_request(&mut persistence, &req, &actor)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET `/shift_requests` endpoint.
///
/// Lists the caller's own requests.
async fn handle_list_shift_requests(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Query(query): Query<ListShiftRequestsQuery>,
) -> Result<Json<Vec<ShiftRequestInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let requests: Vec<ShiftRequestInfo> =
        sifut_api::list_shift_requests(&mut persistence, &query, &actor)?;
    drop(persistence);

    Ok(Json(requests))
}

/// Handler for GET `/shift_requests/{id}` endpoint.
async fn handle_get_shift_request(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(shift_request_id): Path<String>,
) -> Result<Json<ShiftRequestInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let request: ShiftRequestInfo =
        sifut_api::get_shift_request(&mut persistence, &shift_request_id, &actor)?;
    drop(persistence);

    Ok(Json(request))
}

/// Handler for PATCH `/shift_requests/{id}` endpoint.
async fn handle_update_shift_request(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(shift_request_id): Path<String>,
    Json(req): Json<UpdateShiftRequestRequest>,
) -> Result<Json<ShiftRequestInfo>, HttpError> {
    info!(
        actor_id = %actor.id,
        shift_request_id = %shift_request_id,
        "Handling update_shift_request request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let updated: ShiftRequestInfo =
        sifut_api::update_shift_request(&mut persistence, &shift_request_id, &req, &actor)?;
    drop(persistence);

    Ok(Json(updated))
}

/// Handler for POST `/shift_requests/{id}/submit` endpoint.
async fn handle_submit_shift_request(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(shift_request_id): Path<String>,
) -> Result<Json<ShiftRequestInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let submitted: ShiftRequestInfo =
        sifut_api::submit_shift_request(&mut persistence, &shift_request_id, &actor)?;
    drop(persistence);

    Ok(Json(submitted))
}

/// Handler for DELETE `/shift_requests/{id}` endpoint.
async fn handle_delete_shift_request(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(shift_request_id): Path<String>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(
        actor_id = %actor.id,
        shift_request_id = %shift_request_id,
        "Handling delete_shift_request request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse =
        sifut_api::delete_shift_request(&mut persistence, &shift_request_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Projects
// ============================================================================

/// Handler for POST `/projects` endpoint.
async fn handle_create_project(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectInfo>), HttpError> {
    info!(actor_id = %actor.id, name = %req.name, "Handling create_project request");

    let mut persistence = app_state.persistence.lock().await;
    let project: ProjectInfo = sifut_api::create_project(&mut persistence, &req, &actor)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(project)))
}

/// Handler for GET `/projects` endpoint.
async fn handle_list_projects(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Query(query): Query<ListProjectsQuery>,
) -> Result<Json<Vec<ProjectInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let projects: Vec<ProjectInfo> = sifut_api::list_projects(&mut persistence, &query, &actor)?;
    drop(persistence);

    Ok(Json(projects))
}

/// Handler for PUT `/projects/{id}/active` endpoint.
async fn handle_set_project_active(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(project_id): Path<String>,
    Json(req): Json<SetProjectActiveRequest>,
) -> Result<Json<ProjectInfo>, HttpError> {
    info!(
        actor_id = %actor.id,
        project_id = %project_id,
        is_active = req.is_active,
        "Handling set_project_active request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let project: ProjectInfo =
        sifut_api::set_project_active(&mut persistence, &project_id, &req, &actor)?;
    drop(persistence);

    Ok(Json(project))
}

/// Handler for DELETE `/projects/{id}` endpoint.
async fn handle_delete_project(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(project_id): Path<String>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = %actor.id, project_id = %project_id, "Handling delete_project request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse = sifut_api::delete_project(&mut persistence, &project_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Confirmed shifts
// ============================================================================

/// Handler for POST `/confirmed_shifts` endpoint.
async fn handle_create_confirmed_shift(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Json(req): Json<CreateConfirmedShiftRequest>,
) -> Result<(StatusCode, Json<ConfirmedShiftInfo>), HttpError> {
    info!(
        actor_id = %actor.id,
        user_id = %req.user_id,
        date = %req.date,
        "Handling create_confirmed_shift request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let shift: ConfirmedShiftInfo =
        sifut_api::create_confirmed_shift(&mut persistence, &req, &actor)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(shift)))
}

/// Handler for GET `/confirmed_shifts` endpoint.
async fn handle_list_confirmed_shifts(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Query(query): Query<ListConfirmedShiftsQuery>,
) -> Result<Json<Vec<ConfirmedShiftInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let shifts: Vec<ConfirmedShiftInfo> =
        sifut_api::list_confirmed_shifts(&mut persistence, &query, &actor)?;
    drop(persistence);

    Ok(Json(shifts))
}

/// Handler for DELETE `/confirmed_shifts/{id}` endpoint.
///
/// Any calendar event created for the shift is left in place.
async fn handle_delete_confirmed_shift(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(shift_id): Path<String>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = %actor.id, shift_id = %shift_id, "Handling delete_confirmed_shift request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponse =
        sifut_api::delete_confirmed_shift(&mut persistence, &shift_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/confirmed_shifts/{id}/sync` endpoint.
///
/// A calendar failure still answers 200 with `synced: false`.
async fn handle_sync_confirmed_shift(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(shift_id): Path<String>,
    Json(req): Json<SyncConfirmedShiftRequest>,
) -> Result<Json<SyncConfirmedShiftResponse>, HttpError> {
    info!(actor_id = %actor.id, shift_id = %shift_id, "Handling sync_confirmed_shift request");

    let response: SyncConfirmedShiftResponse = sifut_api::sync_confirmed_shift(
        &app_state.persistence,
        app_state.calendar.as_deref(),
        app_state.time_zone,
        &shift_id,
        &req,
        &actor,
    )
    .await?;

    Ok(Json(response))
}

/// Handler for DELETE `/confirmed_shifts/{id}/sync` endpoint.
///
/// A calendar failure still answers 200 with `synced: true`.
async fn handle_unsync_confirmed_shift(
    AxumState(app_state): AxumState<AppState>,
    CallerIdentity(actor): CallerIdentity,
    Path(shift_id): Path<String>,
) -> Result<Json<SyncConfirmedShiftResponse>, HttpError> {
    info!(actor_id = %actor.id, shift_id = %shift_id, "Handling unsync_confirmed_shift request");

    let response: SyncConfirmedShiftResponse = sifut_api::unsync_confirmed_shift(
        &app_state.persistence,
        app_state.calendar.as_deref(),
        &shift_id,
        &actor,
    )
    .await?;

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/optimize", post(handle_optimize))
        .route("/suggestions", get(handle_list_suggestions))
        .route(
            "/suggestions/{id}",
            get(handle_get_suggestion).delete(handle_delete_suggestion),
        )
        .route("/suggestions/{id}/approve", post(handle_approve_suggestion))
        .route("/suggestions/{id}/reject", post(handle_reject_suggestion))
        .route(
            "/shift_requests",
            post(handle_create_shift_request).get(handle_list_shift_requests),
        )
        .route(
            "/shift_requests/{id}",
            get(handle_get_shift_request)
                .patch(handle_update_shift_request)
                .delete(handle_delete_shift_request),
        )
        .route(
            "/shift_requests/{id}/submit",
            post(handle_submit_shift_request),
        )
        .route(
            "/projects",
            post(handle_create_project).get(handle_list_projects),
        )
        .route("/projects/{id}", delete(handle_delete_project))
        .route("/projects/{id}/active", put(handle_set_project_active))
        .route(
            "/confirmed_shifts",
            post(handle_create_confirmed_shift).get(handle_list_confirmed_shifts),
        )
        .route(
            "/confirmed_shifts/{id}",
            delete(handle_delete_confirmed_shift),
        )
        .route(
            "/confirmed_shifts/{id}/sync",
            post(handle_sync_confirmed_shift).delete(handle_unsync_confirmed_shift),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing SIFUT Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let timeout: Duration = Duration::from_secs(args.oracle_timeout_secs);
    let oracle_config: OracleConfig = OracleConfig {
        provider: args.ai_provider.parse::<OracleProvider>()?,
        anthropic_api_key: args.anthropic_api_key,
        anthropic_model: args.anthropic_model,
        openai_api_key: args.openai_api_key,
        openai_model: args.openai_model,
        gemini_api_key: args.gemini_api_key,
        gemini_model: args.gemini_model,
        timeout,
        base_url: None,
    };
    let oracle: Arc<dyn OptimizationOracle> = build_oracle(&oracle_config)?;

    let time_zone: Tz = parse_timezone(&args.calendar_time_zone)?;
    let calendar: Option<Arc<dyn CalendarGateway>> = match args.calendar_access_token {
        Some(token) if !token.trim().is_empty() => {
            info!(time_zone = %time_zone, "Calendar sync enabled");
            Some(build_calendar(token, timeout)?)
        }
        _ => {
            warn!("No calendar access token configured; calendar sync is disabled");
            None
        }
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        oracle,
        calendar,
        time_zone,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
