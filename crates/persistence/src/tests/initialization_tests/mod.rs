// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use tempfile::TempDir;

use crate::Persistence;
use crate::error::PersistenceError;
use crate::tests::create_project;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    db1.create_project(&create_project("p1", 1)).unwrap();

    assert_eq!(db1.list_projects(false).unwrap().len(), 1);
    assert!(
        db2.list_projects(false).unwrap().is_empty(),
        "db2 should not see projects created in db1"
    );
}

#[test]
fn test_migrations_applied_on_initialization() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    assert!(persistence.list_suggestions(None).unwrap().is_empty());
    assert!(
        persistence
            .list_confirmed_shifts(&crate::ConfirmedShiftFilter::default())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_file_database_initializes_and_reopens() {
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("sifut.db");

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        persistence.create_project(&create_project("p1", 3)).unwrap();
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let project = reopened.get_project("p1").unwrap().unwrap();
    assert_eq!(project.required_members, 3);
}
