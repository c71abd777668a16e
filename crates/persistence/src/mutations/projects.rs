// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sifut_domain::Project;
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::{ProjectRow, encode_timestamp};
use crate::diesel_schema::{confirmed_shifts, optimization_assignments, projects};
use crate::error::PersistenceError;

/// Inserts a new project.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_project(conn: &mut SqliteConnection, project: &Project) -> Result<(), PersistenceError> {
    let row: ProjectRow = ProjectRow::from_domain(project)?;
    diesel::insert_into(projects::table)
        .values(&row)
        .execute(conn)?;

    info!(
        project_id = %project.id,
        name = %project.name,
        required_members = project.required_members,
        "Created project"
    );
    Ok(())
}

/// Activates or deactivates a project. Returns whether a row changed.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_project_active(
    conn: &mut SqliteConnection,
    project_id: &str,
    is_active: bool,
    now: OffsetDateTime,
) -> Result<bool, PersistenceError> {
    let updated: usize = diesel::update(projects::table.find(project_id))
        .set((
            projects::is_active.eq(i32::from(is_active)),
            projects::updated_at.eq(encode_timestamp(now)?),
        ))
        .execute(conn)?;

    if updated > 0 {
        info!(project_id, is_active, "Changed project activity");
    }
    Ok(updated > 0)
}

/// Deletes a project with its assignments and confirmed shifts.
///
/// Returns whether the project existed.
///
/// # Errors
///
/// Returns an error if any delete fails. Nothing is removed in that case.
pub fn delete_project(conn: &mut SqliteConnection, project_id: &str) -> Result<bool, PersistenceError> {
    conn.transaction::<bool, PersistenceError, _>(|conn| {
        let assignments: usize = diesel::delete(
            optimization_assignments::table
                .filter(optimization_assignments::project_id.eq(project_id)),
        )
        .execute(conn)?;
        let shifts: usize = diesel::delete(
            confirmed_shifts::table.filter(confirmed_shifts::project_id.eq(project_id)),
        )
        .execute(conn)?;
        let deleted: usize = diesel::delete(projects::table.find(project_id)).execute(conn)?;

        if deleted > 0 {
            info!(
                project_id,
                assignments, shifts, "Deleted project with its assignments and shifts"
            );
        }
        Ok(deleted > 0)
    })
}
