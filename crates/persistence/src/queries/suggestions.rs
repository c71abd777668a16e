// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Suggestion ledger reads.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sifut_domain::{Month, OptimizationAssignment, OptimizationSuggestion};

use crate::data_models::{AssignmentRow, SuggestionRow};
use crate::diesel_schema::{optimization_assignments, optimization_suggestions};
use crate::error::PersistenceError;

/// Retrieves a suggestion by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_suggestion(
    conn: &mut SqliteConnection,
    suggestion_id: &str,
) -> Result<Option<OptimizationSuggestion>, PersistenceError> {
    optimization_suggestions::table
        .find(suggestion_id)
        .select(SuggestionRow::as_select())
        .first(conn)
        .optional()?
        .map(SuggestionRow::into_domain)
        .transpose()
}

/// Lists suggestions newest first, optionally for one month.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_suggestions(
    conn: &mut SqliteConnection,
    month: Option<Month>,
) -> Result<Vec<OptimizationSuggestion>, PersistenceError> {
    let mut query = optimization_suggestions::table
        .select(SuggestionRow::as_select())
        .into_boxed();
    if let Some(month) = month {
        query = query.filter(optimization_suggestions::month.eq(month.to_string()));
    }

    let rows: Vec<SuggestionRow> = query
        .order((
            optimization_suggestions::created_at.desc(),
            optimization_suggestions::id.desc(),
        ))
        .load(conn)?;
    rows.into_iter().map(SuggestionRow::into_domain).collect()
}

/// Lists a suggestion's assignments by date, start time and member.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_assignments(
    conn: &mut SqliteConnection,
    suggestion_id: &str,
) -> Result<Vec<OptimizationAssignment>, PersistenceError> {
    let rows: Vec<AssignmentRow> = optimization_assignments::table
        .filter(optimization_assignments::suggestion_id.eq(suggestion_id))
        .select(AssignmentRow::as_select())
        .order((
            optimization_assignments::date.asc(),
            optimization_assignments::start_time.asc(),
            optimization_assignments::user_id.asc(),
            optimization_assignments::id.asc(),
        ))
        .load(conn)?;
    rows.into_iter().map(AssignmentRow::into_domain).collect()
}
