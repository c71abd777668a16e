// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sifut_domain::ConfirmedShift;
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::{ConfirmedShiftRow, encode_timestamp};
use crate::diesel_schema::confirmed_shifts;
use crate::error::PersistenceError;

/// Inserts confirmed shifts. Callers wrap this in their transaction.
///
/// # Errors
///
/// Returns an error on the first failing insert.
pub fn insert_confirmed_shifts(
    conn: &mut SqliteConnection,
    shifts: &[ConfirmedShift],
) -> Result<(), PersistenceError> {
    for shift in shifts {
        let row: ConfirmedShiftRow = ConfirmedShiftRow::from_domain(shift)?;
        diesel::insert_into(confirmed_shifts::table)
            .values(&row)
            .execute(conn)?;
    }
    Ok(())
}

/// Inserts one confirmed shift created outside the optimization flow.
///
/// # Errors
///
/// Returns an error if the insert fails, for example when the project does
/// not exist.
pub fn insert_confirmed_shift(
    conn: &mut SqliteConnection,
    shift: &ConfirmedShift,
) -> Result<(), PersistenceError> {
    insert_confirmed_shifts(conn, std::slice::from_ref(shift))?;
    info!(
        shift_id = %shift.id,
        user_id = %shift.user_id,
        project_id = %shift.project_id,
        "Created confirmed shift"
    );
    Ok(())
}

/// Records the calendar event a shift was synced to.
///
/// # Errors
///
/// Returns `NotFound` if the shift does not exist, or an error if the update
/// fails.
pub fn set_calendar_event_id(
    conn: &mut SqliteConnection,
    shift_id: &str,
    event_id: &str,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(confirmed_shifts::table.find(shift_id))
        .set((
            confirmed_shifts::calendar_event_id.eq(event_id),
            confirmed_shifts::updated_at.eq(encode_timestamp(now)?),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Confirmed shift {shift_id} not found"
        )));
    }
    info!(shift_id, event_id, "Linked confirmed shift to calendar event");
    Ok(())
}

/// Forgets the calendar event of a shift whose event was removed.
///
/// # Errors
///
/// Returns `NotFound` if the shift does not exist, or an error if the update
/// fails.
pub fn clear_calendar_event_id(
    conn: &mut SqliteConnection,
    shift_id: &str,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(confirmed_shifts::table.find(shift_id))
        .set((
            confirmed_shifts::calendar_event_id.eq(None::<String>),
            confirmed_shifts::updated_at.eq(encode_timestamp(now)?),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Confirmed shift {shift_id} not found"
        )));
    }
    info!(shift_id, "Unlinked confirmed shift from calendar event");
    Ok(())
}

/// Deletes a confirmed shift. Returns whether a row was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_confirmed_shift(
    conn: &mut SqliteConnection,
    shift_id: &str,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(confirmed_shifts::table.find(shift_id)).execute(conn)?;
    if deleted > 0 {
        info!(shift_id, "Deleted confirmed shift");
    }
    Ok(deleted > 0)
}
