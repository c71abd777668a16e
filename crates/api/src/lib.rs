// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for SIFUT.
//!
//! Authorization, request validation, error translation and the
//! orchestration of core and persistence calls behind every endpoint. No
//! transport concerns live here.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;


pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    approve_suggestion, create_confirmed_shift, create_project, create_shift_request,
    delete_confirmed_shift, delete_project, delete_shift_request, delete_suggestion,
    get_shift_request, get_suggestion, list_confirmed_shifts, list_projects, list_shift_requests,
    list_suggestions, optimize, reject_suggestion, set_project_active, submit_shift_request,
    sync_confirmed_shift, unsync_confirmed_shift, update_shift_request,
};
pub use request_response::{
    ApproveSuggestionResponse, AssignmentInfo, ConfirmedShiftInfo, CreateConfirmedShiftRequest,
    CreateProjectRequest, CreateShiftRequestRequest, DeleteResponse, ListConfirmedShiftsQuery,
    ListProjectsQuery, ListShiftRequestsQuery, ListSuggestionsQuery, OptimizeRequest,
    ProjectInfo, RejectSuggestionResponse, SetProjectActiveRequest, ShiftRequestInfo,
    SuggestionDetail, SuggestionInfo, SummaryInfo, SyncConfirmedShiftRequest,
    SyncConfirmedShiftResponse, UpdateShiftRequestRequest,
};
