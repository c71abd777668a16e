// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sifut_domain::{Month, ShiftRequest, ShiftRequestStatus, format_date};
use tracing::debug;

use crate::data_models::ShiftRequestRow;
use crate::diesel_schema::shift_requests;
use crate::error::PersistenceError;
use crate::queries::ShiftRequestFilter;

/// Retrieves a shift request by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_shift_request(
    conn: &mut SqliteConnection,
    shift_request_id: &str,
) -> Result<Option<ShiftRequest>, PersistenceError> {
    shift_requests::table
        .find(shift_request_id)
        .select(ShiftRequestRow::as_select())
        .first(conn)
        .optional()?
        .map(ShiftRequestRow::into_domain)
        .transpose()
}

/// Lists shift requests matching `filter`, by date then start time.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_shift_requests(
    conn: &mut SqliteConnection,
    filter: &ShiftRequestFilter,
) -> Result<Vec<ShiftRequest>, PersistenceError> {
    let mut query = shift_requests::table
        .select(ShiftRequestRow::as_select())
        .into_boxed();

    if let Some(user_id) = &filter.user_id {
        query = query.filter(shift_requests::user_id.eq(user_id.clone()));
    }
    if let Some(start_date) = filter.start_date {
        query = query.filter(shift_requests::date.ge(format_date(start_date)));
    }
    if let Some(end_date) = filter.end_date {
        query = query.filter(shift_requests::date.le(format_date(end_date)));
    }
    if let Some(status) = filter.status {
        query = query.filter(shift_requests::status.eq(status.as_str()));
    }

    let rows: Vec<ShiftRequestRow> = query
        .order((
            shift_requests::date.asc(),
            shift_requests::start_time.asc(),
            shift_requests::user_id.asc(),
            shift_requests::id.asc(),
        ))
        .load(conn)?;

    debug!(count = rows.len(), "Loaded shift requests");
    rows.into_iter().map(ShiftRequestRow::into_domain).collect()
}

/// Lists every submitted shift request dated inside `month`.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_submitted_in_month(
    conn: &mut SqliteConnection,
    month: Month,
) -> Result<Vec<ShiftRequest>, PersistenceError> {
    let out_of_range = |e: sifut_domain::DomainError| PersistenceError::QueryFailed(e.to_string());
    let filter: ShiftRequestFilter = ShiftRequestFilter {
        user_id: None,
        start_date: Some(month.first_day().map_err(out_of_range)?),
        end_date: Some(month.last_day().map_err(out_of_range)?),
        status: Some(ShiftRequestStatus::Submitted),
    };
    list_shift_requests(conn, &filter)
}
