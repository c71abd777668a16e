// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sifut_domain::Project;

use crate::data_models::ProjectRow;
use crate::diesel_schema::projects;
use crate::error::PersistenceError;

/// Retrieves a project by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_project(
    conn: &mut SqliteConnection,
    project_id: &str,
) -> Result<Option<Project>, PersistenceError> {
    projects::table
        .find(project_id)
        .select(ProjectRow::as_select())
        .first(conn)
        .optional()?
        .map(ProjectRow::into_domain)
        .transpose()
}

/// Lists projects by name, optionally only the active ones.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_projects(
    conn: &mut SqliteConnection,
    active_only: bool,
) -> Result<Vec<Project>, PersistenceError> {
    let mut query = projects::table.select(ProjectRow::as_select()).into_boxed();
    if active_only {
        query = query.filter(projects::is_active.eq(1));
    }

    let rows: Vec<ProjectRow> = query
        .order((projects::name.asc(), projects::id.asc()))
        .load(conn)?;
    rows.into_iter().map(ProjectRow::into_domain).collect()
}
