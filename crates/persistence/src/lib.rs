// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for SIFUT.
//!
//! Stores member availability, the staffing registry, the suggestion ledger
//! and the confirmed schedule in `SQLite` through Diesel.
//!
//! ## Storage
//!
//! - File databases run in WAL mode
//! - In-memory databases are uniquely named per adapter, so tests are
//!   isolated from each other
//! - Foreign key enforcement is verified at startup and refused if off
//!
//! ## Transactions
//!
//! Suggestion creation, approval, rejection and the cascading deletes each
//! run in a single transaction. Approval holds the write lock from its
//! first read, which serializes concurrent approvers of one suggestion.

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

use diesel::SqliteConnection;
use sifut::{ApprovalPlan, SuggestionPlan};
use sifut_domain::{
    ConfirmedShift, Month, OptimizationAssignment, OptimizationSuggestion, Project, ShiftRequest,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;


pub use error::PersistenceError;
pub use queries::{ConfirmedShiftFilter, ShiftRequestFilter};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over one `SQLite` connection.
///
/// Callers share it behind a mutex. Every method takes `&mut self`.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8 or the database cannot
    /// be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is still enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if enforcement is off or the check fails.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Shift requests
    // ========================================================================

    /// Stores a new shift request.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_shift_request(&mut self, request: &ShiftRequest) -> Result<(), PersistenceError> {
        mutations::shift_requests::insert_shift_request(&mut self.conn, request)
    }

    /// Overwrites an existing shift request.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist, or an error if the update fails.
    pub fn update_shift_request(&mut self, request: &ShiftRequest) -> Result<(), PersistenceError> {
        mutations::shift_requests::update_shift_request(&mut self.conn, request)
    }

    /// Deletes a shift request. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_shift_request(&mut self, shift_request_id: &str) -> Result<bool, PersistenceError> {
        mutations::shift_requests::delete_shift_request(&mut self.conn, shift_request_id)
    }

    /// Retrieves a shift request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_shift_request(
        &mut self,
        shift_request_id: &str,
    ) -> Result<Option<ShiftRequest>, PersistenceError> {
        queries::shift_requests::get_shift_request(&mut self.conn, shift_request_id)
    }

    /// Lists shift requests matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_shift_requests(
        &mut self,
        filter: &ShiftRequestFilter,
    ) -> Result<Vec<ShiftRequest>, PersistenceError> {
        queries::shift_requests::list_shift_requests(&mut self.conn, filter)
    }

    /// Lists the submitted shift requests dated within `month`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_submitted_in_month(
        &mut self,
        month: Month,
    ) -> Result<Vec<ShiftRequest>, PersistenceError> {
        queries::shift_requests::list_submitted_in_month(&mut self.conn, month)
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_project(&mut self, project: &Project) -> Result<(), PersistenceError> {
        mutations::projects::insert_project(&mut self.conn, project)
    }

    /// Activates or deactivates a project and returns its new state.
    ///
    /// # Errors
    ///
    /// Returns an error if the update or the re-read fails.
    pub fn set_project_active(
        &mut self,
        project_id: &str,
        is_active: bool,
        now: OffsetDateTime,
    ) -> Result<Option<Project>, PersistenceError> {
        if !mutations::projects::set_project_active(&mut self.conn, project_id, is_active, now)? {
            return Ok(None);
        }
        queries::projects::get_project(&mut self.conn, project_id)
    }

    /// Deletes a project with its assignments and confirmed shifts.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_project(&mut self, project_id: &str) -> Result<bool, PersistenceError> {
        mutations::projects::delete_project(&mut self.conn, project_id)
    }

    /// Retrieves a project by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_project(&mut self, project_id: &str) -> Result<Option<Project>, PersistenceError> {
        queries::projects::get_project(&mut self.conn, project_id)
    }

    /// Lists projects by name, optionally only active ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_projects(&mut self, active_only: bool) -> Result<Vec<Project>, PersistenceError> {
        queries::projects::list_projects(&mut self.conn, active_only)
    }

    // ========================================================================
    // Suggestion ledger
    // ========================================================================

    /// Stores a suggestion and its assignments atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails. Nothing is stored in that case.
    pub fn persist_suggestion(&mut self, plan: &SuggestionPlan) -> Result<(), PersistenceError> {
        mutations::suggestions::persist_suggestion(&mut self.conn, plan)
    }

    /// Approves a pending suggestion and creates its confirmed shifts.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `TransitionRejected` or a database error. Nothing
    /// changes on error.
    pub fn approve_suggestion(
        &mut self,
        suggestion_id: &str,
        approved_by: &str,
        now: OffsetDateTime,
    ) -> Result<ApprovalPlan, PersistenceError> {
        mutations::suggestions::approve_suggestion(&mut self.conn, suggestion_id, approved_by, now)
    }

    /// Rejects a pending suggestion.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `TransitionRejected` or a database error.
    pub fn reject_suggestion(
        &mut self,
        suggestion_id: &str,
    ) -> Result<OptimizationSuggestion, PersistenceError> {
        mutations::suggestions::reject_suggestion(&mut self.conn, suggestion_id)
    }

    /// Deletes a suggestion and its assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_suggestion(&mut self, suggestion_id: &str) -> Result<bool, PersistenceError> {
        mutations::suggestions::delete_suggestion(&mut self.conn, suggestion_id)
    }

    /// Retrieves a suggestion by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_suggestion(
        &mut self,
        suggestion_id: &str,
    ) -> Result<Option<OptimizationSuggestion>, PersistenceError> {
        queries::suggestions::get_suggestion(&mut self.conn, suggestion_id)
    }

    /// Lists suggestions newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_suggestions(
        &mut self,
        month: Option<Month>,
    ) -> Result<Vec<OptimizationSuggestion>, PersistenceError> {
        queries::suggestions::list_suggestions(&mut self.conn, month)
    }

    /// Lists a suggestion's assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_assignments(
        &mut self,
        suggestion_id: &str,
    ) -> Result<Vec<OptimizationAssignment>, PersistenceError> {
        queries::suggestions::list_assignments(&mut self.conn, suggestion_id)
    }

    // ========================================================================
    // Confirmed shifts
    // ========================================================================

    /// Stores a manually created confirmed shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_confirmed_shift(&mut self, shift: &ConfirmedShift) -> Result<(), PersistenceError> {
        mutations::confirmed_shifts::insert_confirmed_shift(&mut self.conn, shift)
    }

    /// Records the calendar event a shift was mirrored to.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift does not exist, or an error if the
    /// update fails.
    pub fn set_calendar_event_id(
        &mut self,
        shift_id: &str,
        event_id: &str,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::confirmed_shifts::set_calendar_event_id(&mut self.conn, shift_id, event_id, now)
    }

    /// Clears the calendar event recorded on a shift.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the shift does not exist, or an error if the
    /// update fails.
    pub fn clear_calendar_event_id(
        &mut self,
        shift_id: &str,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::confirmed_shifts::clear_calendar_event_id(&mut self.conn, shift_id, now)
    }

    /// Deletes a confirmed shift. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_confirmed_shift(&mut self, shift_id: &str) -> Result<bool, PersistenceError> {
        mutations::confirmed_shifts::delete_confirmed_shift(&mut self.conn, shift_id)
    }

    /// Retrieves a confirmed shift by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_confirmed_shift(
        &mut self,
        shift_id: &str,
    ) -> Result<Option<ConfirmedShift>, PersistenceError> {
        queries::confirmed_shifts::get_confirmed_shift(&mut self.conn, shift_id)
    }

    /// Lists confirmed shifts matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_confirmed_shifts(
        &mut self,
        filter: &ConfirmedShiftFilter,
    ) -> Result<Vec<ConfirmedShift>, PersistenceError> {
        queries::confirmed_shifts::list_confirmed_shifts(&mut self.conn, filter)
    }
}
