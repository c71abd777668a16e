// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sifut_domain::{ConfirmedShift, format_date};

use crate::data_models::ConfirmedShiftRow;
use crate::diesel_schema::confirmed_shifts;
use crate::error::PersistenceError;
use crate::queries::ConfirmedShiftFilter;

/// Retrieves a confirmed shift by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_confirmed_shift(
    conn: &mut SqliteConnection,
    shift_id: &str,
) -> Result<Option<ConfirmedShift>, PersistenceError> {
    confirmed_shifts::table
        .find(shift_id)
        .select(ConfirmedShiftRow::as_select())
        .first(conn)
        .optional()?
        .map(ConfirmedShiftRow::into_domain)
        .transpose()
}

/// Lists confirmed shifts matching `filter`, by date then start time.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_confirmed_shifts(
    conn: &mut SqliteConnection,
    filter: &ConfirmedShiftFilter,
) -> Result<Vec<ConfirmedShift>, PersistenceError> {
    let mut query = confirmed_shifts::table
        .select(ConfirmedShiftRow::as_select())
        .into_boxed();

    if let Some(user_id) = &filter.user_id {
        query = query.filter(confirmed_shifts::user_id.eq(user_id.clone()));
    }
    if let Some(project_id) = &filter.project_id {
        query = query.filter(confirmed_shifts::project_id.eq(project_id.clone()));
    }
    if let Some(start_date) = filter.start_date {
        query = query.filter(confirmed_shifts::date.ge(format_date(start_date)));
    }
    if let Some(end_date) = filter.end_date {
        query = query.filter(confirmed_shifts::date.le(format_date(end_date)));
    }

    let rows: Vec<ConfirmedShiftRow> = query
        .order((
            confirmed_shifts::date.asc(),
            confirmed_shifts::start_time.asc(),
            confirmed_shifts::user_id.asc(),
            confirmed_shifts::id.asc(),
        ))
        .load(conn)?;
    rows.into_iter().map(ConfirmedShiftRow::into_domain).collect()
}
