// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Suggestion ledger writes.
//!
//! ## Atomicity
//!
//! A suggestion and its assignments are inserted together or not at all.
//! Approval runs under an immediate (write-locked) transaction: the status
//! re-check, the confirmed-shift inserts and the status update either all
//! commit or all roll back. The status update is conditional on the row
//! still being `pending`, so a second approver can never produce a second
//! set of confirmed shifts.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sifut::{ApprovalPlan, CoreError, SuggestionPlan, plan_approval, plan_rejection};
use sifut_domain::{OptimizationAssignment, OptimizationSuggestion, SuggestionStatus};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::data_models::{AssignmentRow, SuggestionRow, encode_timestamp};
use crate::diesel_schema::{optimization_assignments, optimization_suggestions};
use crate::error::PersistenceError;
use crate::mutations::confirmed_shifts::insert_confirmed_shifts;
use crate::queries::suggestions::{get_suggestion, list_assignments};

fn not_found(suggestion_id: &str) -> PersistenceError {
    PersistenceError::NotFound(format!("Suggestion {suggestion_id} not found"))
}

/// Builds the error for a conditional update that matched no row.
fn lost_race(
    conn: &mut SqliteConnection,
    suggestion_id: &str,
    target: SuggestionStatus,
) -> PersistenceError {
    match get_suggestion(conn, suggestion_id) {
        Ok(Some(current)) => match current.check_transition(target) {
            Err(err) => PersistenceError::TransitionRejected(CoreError::from(err)),
            Ok(()) => PersistenceError::QueryFailed(format!(
                "Suggestion {suggestion_id} changed during update"
            )),
        },
        Ok(None) => not_found(suggestion_id),
        Err(err) => err,
    }
}

/// Stores a planned suggestion and all of its assignments.
///
/// # Errors
///
/// Returns an error if any insert fails. Nothing is stored in that case.
pub fn persist_suggestion(
    conn: &mut SqliteConnection,
    plan: &SuggestionPlan,
) -> Result<(), PersistenceError> {
    let suggestion_row: SuggestionRow = SuggestionRow::from_domain(&plan.suggestion)?;
    let assignment_rows: Vec<AssignmentRow> = plan
        .assignments
        .iter()
        .map(AssignmentRow::from_domain)
        .collect();

    conn.transaction::<(), PersistenceError, _>(|conn| {
        diesel::insert_into(optimization_suggestions::table)
            .values(&suggestion_row)
            .execute(conn)?;
        for row in &assignment_rows {
            diesel::insert_into(optimization_assignments::table)
                .values(row)
                .execute(conn)?;
        }
        Ok(())
    })
    .inspect_err(|err| {
        warn!(
            suggestion_id = %plan.suggestion.id,
            error = %err,
            "Failed to store suggestion; transaction rolled back"
        );
    })?;

    info!(
        suggestion_id = %plan.suggestion.id,
        month = %plan.suggestion.month,
        assignments = plan.assignments.len(),
        "Stored optimization suggestion"
    );
    Ok(())
}

/// Approves a pending suggestion, materializing one confirmed shift per
/// assignment.
///
/// # Errors
///
/// Returns `NotFound` for an unknown suggestion, `TransitionRejected` if it
/// is already approved or was rejected, or a database error. On any error
/// no confirmed shift is stored and the status is unchanged.
pub fn approve_suggestion(
    conn: &mut SqliteConnection,
    suggestion_id: &str,
    approved_by: &str,
    now: OffsetDateTime,
) -> Result<ApprovalPlan, PersistenceError> {
    let approved_at: String = encode_timestamp(now)?;

    let plan: ApprovalPlan = conn.immediate_transaction::<ApprovalPlan, PersistenceError, _>(
        |conn| {
            let suggestion: OptimizationSuggestion =
                get_suggestion(conn, suggestion_id)?.ok_or_else(|| not_found(suggestion_id))?;
            let assignments: Vec<OptimizationAssignment> = list_assignments(conn, suggestion_id)?;

            let plan: ApprovalPlan = plan_approval(&suggestion, &assignments, approved_by, now)?;

            insert_confirmed_shifts(conn, &plan.confirmed_shifts)?;

            let updated: usize = diesel::update(
                optimization_suggestions::table
                    .filter(optimization_suggestions::id.eq(suggestion_id))
                    .filter(optimization_suggestions::status.eq(SuggestionStatus::Pending.as_str())),
            )
            .set((
                optimization_suggestions::status.eq(SuggestionStatus::Approved.as_str()),
                optimization_suggestions::approved_by.eq(approved_by),
                optimization_suggestions::approved_at.eq(&approved_at),
            ))
            .execute(conn)?;

            if updated == 0 {
                return Err(lost_race(conn, suggestion_id, SuggestionStatus::Approved));
            }
            Ok(plan)
        },
    )
    .inspect_err(|err| {
        warn!(suggestion_id, error = %err, "Approval rolled back");
    })?;

    info!(
        suggestion_id,
        approved_by,
        confirmed_shifts = plan.confirmed_shifts.len(),
        "Approved optimization suggestion"
    );
    Ok(plan)
}

/// Rejects a pending suggestion. No shifts are created.
///
/// # Errors
///
/// Returns `NotFound` for an unknown suggestion, `TransitionRejected` if it
/// is not pending, or a database error.
pub fn reject_suggestion(
    conn: &mut SqliteConnection,
    suggestion_id: &str,
) -> Result<OptimizationSuggestion, PersistenceError> {
    let rejected: OptimizationSuggestion = conn
        .immediate_transaction::<OptimizationSuggestion, PersistenceError, _>(|conn| {
            let suggestion: OptimizationSuggestion =
                get_suggestion(conn, suggestion_id)?.ok_or_else(|| not_found(suggestion_id))?;
            let rejected: OptimizationSuggestion = plan_rejection(&suggestion)?;

            let updated: usize = diesel::update(
                optimization_suggestions::table
                    .filter(optimization_suggestions::id.eq(suggestion_id))
                    .filter(optimization_suggestions::status.eq(SuggestionStatus::Pending.as_str())),
            )
            .set(optimization_suggestions::status.eq(SuggestionStatus::Rejected.as_str()))
            .execute(conn)?;

            if updated == 0 {
                return Err(lost_race(conn, suggestion_id, SuggestionStatus::Rejected));
            }
            Ok(rejected)
        })?;

    info!(suggestion_id, "Rejected optimization suggestion");
    Ok(rejected)
}

/// Deletes a suggestion and its assignments. Confirmed shifts created by an
/// earlier approval are kept.
///
/// Returns whether the suggestion existed.
///
/// # Errors
///
/// Returns an error if a delete fails. Nothing is removed in that case.
pub fn delete_suggestion(
    conn: &mut SqliteConnection,
    suggestion_id: &str,
) -> Result<bool, PersistenceError> {
    conn.transaction::<bool, PersistenceError, _>(|conn| {
        diesel::delete(
            optimization_assignments::table
                .filter(optimization_assignments::suggestion_id.eq(suggestion_id)),
        )
        .execute(conn)?;
        let deleted: usize =
            diesel::delete(optimization_suggestions::table.find(suggestion_id)).execute(conn)?;
        if deleted > 0 {
            info!(suggestion_id, "Deleted optimization suggestion");
        }
        Ok(deleted > 0)
    })
}
