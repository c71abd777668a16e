// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sifut_domain::Project;
use time::macros::datetime;

use crate::tests::{create_confirmed_shift, create_plan, create_project, fixed_now};
use crate::{ConfirmedShiftFilter, Persistence};

fn setup() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut gamma: Project = create_project("p3", 1);
    gamma.name = String::from("Gamma");
    gamma.is_active = false;
    let mut alpha: Project = create_project("p1", 2);
    alpha.name = String::from("Alpha");
    let mut beta: Project = create_project("p2", 1);
    beta.name = String::from("Beta");

    for project in [&gamma, &alpha, &beta] {
        persistence.create_project(project).unwrap();
    }
    persistence
}

#[test]
fn test_get_project_round_trips() {
    let mut persistence: Persistence = setup();

    let project: Project = persistence.get_project("p1").unwrap().unwrap();

    assert_eq!(project.name, "Alpha");
    assert_eq!(project.required_members, 2);
    assert_eq!(project.color.as_deref(), Some("#3366FF"));
    assert!(project.is_active);
    assert_eq!(project.created_at, fixed_now());
}

#[test]
fn test_list_projects_orders_by_name() {
    let mut persistence: Persistence = setup();

    let names: Vec<String> = persistence
        .list_projects(false)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();

    assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
}

#[test]
fn test_list_projects_active_only_skips_inactive() {
    let mut persistence: Persistence = setup();

    let ids: Vec<String> = persistence
        .list_projects(true)
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(ids, vec!["p1", "p2"]);
}

#[test]
fn test_set_project_active_returns_updated_project() {
    let mut persistence: Persistence = setup();
    let later = datetime!(2025-06-01 00:00 UTC);

    let project: Project = persistence
        .set_project_active("p3", true, later)
        .unwrap()
        .unwrap();

    assert!(project.is_active);
    assert_eq!(project.updated_at, later);
    assert_eq!(persistence.list_projects(true).unwrap().len(), 3);
}

#[test]
fn test_set_project_active_unknown_returns_none() {
    let mut persistence: Persistence = setup();
    assert!(
        persistence
            .set_project_active("missing", false, fixed_now())
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_project_cascades_to_assignments_and_shifts() {
    let mut persistence: Persistence = setup();
    persistence
        .persist_suggestion(&create_plan(
            "s1",
            fixed_now(),
            &[("u1", "p1", "2025-06-02"), ("u2", "p2", "2025-06-02")],
        ))
        .unwrap();
    persistence
        .create_confirmed_shift(&create_confirmed_shift("cs-1", "u1", "p1", "2025-06-03"))
        .unwrap();
    persistence
        .create_confirmed_shift(&create_confirmed_shift("cs-2", "u2", "p2", "2025-06-03"))
        .unwrap();

    assert!(persistence.delete_project("p1").unwrap());

    assert!(persistence.get_project("p1").unwrap().is_none());
    let assignments = persistence.list_assignments("s1").unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].project_id, "p2");
    let shifts = persistence
        .list_confirmed_shifts(&ConfirmedShiftFilter::default())
        .unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].id, "cs-2");
    assert!(persistence.get_suggestion("s1").unwrap().is_some());
}

#[test]
fn test_delete_unknown_project_returns_false() {
    let mut persistence: Persistence = setup();
    assert!(!persistence.delete_project("missing").unwrap());
}
