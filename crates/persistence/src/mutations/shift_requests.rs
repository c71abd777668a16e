// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sifut_domain::ShiftRequest;
use tracing::info;

use crate::data_models::ShiftRequestRow;
use crate::diesel_schema::shift_requests;
use crate::error::PersistenceError;

/// Inserts a new shift request.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_shift_request(
    conn: &mut SqliteConnection,
    request: &ShiftRequest,
) -> Result<(), PersistenceError> {
    let row: ShiftRequestRow = ShiftRequestRow::from_domain(request)?;
    diesel::insert_into(shift_requests::table)
        .values(&row)
        .execute(conn)?;

    info!(
        shift_request_id = %request.id,
        user_id = %request.user_id,
        date = %row.date,
        "Created shift request"
    );
    Ok(())
}

/// Overwrites the mutable fields of an existing shift request.
///
/// # Errors
///
/// Returns `NotFound` if no row has the request's ID, or an error if the
/// update fails.
pub fn update_shift_request(
    conn: &mut SqliteConnection,
    request: &ShiftRequest,
) -> Result<(), PersistenceError> {
    let row: ShiftRequestRow = ShiftRequestRow::from_domain(request)?;
    let updated: usize = diesel::update(shift_requests::table.find(&row.id))
        .set((
            shift_requests::date.eq(&row.date),
            shift_requests::start_time.eq(&row.start_time),
            shift_requests::end_time.eq(&row.end_time),
            shift_requests::comment.eq(&row.comment),
            shift_requests::status.eq(&row.status),
            shift_requests::submitted_at.eq(&row.submitted_at),
            shift_requests::updated_at.eq(&row.updated_at),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Shift request {} not found",
            request.id
        )));
    }

    info!(
        shift_request_id = %request.id,
        status = %request.status,
        "Updated shift request"
    );
    Ok(())
}

/// Deletes a shift request. Returns whether a row was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_shift_request(
    conn: &mut SqliteConnection,
    shift_request_id: &str,
) -> Result<bool, PersistenceError> {
    let deleted: usize =
        diesel::delete(shift_requests::table.find(shift_request_id)).execute(conn)?;
    if deleted > 0 {
        info!(shift_request_id, "Deleted shift request");
    }
    Ok(deleted > 0)
}
