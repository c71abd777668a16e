// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sifut::SuggestionPlan;
use sifut_domain::{OptimizationSuggestion, SuggestionStatus};
use time::macros::datetime;

use crate::Persistence;
use crate::error::PersistenceError;
use crate::tests::{create_plan, fixed_now, setup_with_project};

#[test]
fn test_persist_suggestion_stores_suggestion_and_assignments() {
    let mut persistence: Persistence = setup_with_project();
    let plan: SuggestionPlan = create_plan(
        "s1",
        fixed_now(),
        &[("u2", "p1", "2025-06-02"), ("u1", "p1", "2025-06-02")],
    );

    persistence.persist_suggestion(&plan).unwrap();

    let loaded: OptimizationSuggestion = persistence.get_suggestion("s1").unwrap().unwrap();
    assert_eq!(loaded, plan.suggestion);
    assert_eq!(loaded.summary.total_shifts(), Some(2));
    assert_eq!(loaded.summary.notes(), vec!["balanced"]);

    let users: Vec<String> = persistence
        .list_assignments("s1")
        .unwrap()
        .into_iter()
        .map(|a| a.user_id)
        .collect();
    assert_eq!(users, vec!["u1", "u2"]);
}

#[test]
fn test_persist_suggestion_with_no_assignments() {
    let mut persistence: Persistence = setup_with_project();

    persistence
        .persist_suggestion(&create_plan("s1", fixed_now(), &[]))
        .unwrap();

    assert!(persistence.get_suggestion("s1").unwrap().is_some());
    assert!(persistence.list_assignments("s1").unwrap().is_empty());
}

#[test]
fn test_failed_assignment_insert_stores_nothing() {
    let mut persistence: Persistence = setup_with_project();
    let plan: SuggestionPlan = create_plan(
        "s1",
        fixed_now(),
        &[("u1", "p1", "2025-06-02"), ("u2", "no-such-project", "2025-06-02")],
    );

    let result: Result<(), PersistenceError> = persistence.persist_suggestion(&plan);

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
    assert!(persistence.get_suggestion("s1").unwrap().is_none());
    assert!(persistence.list_assignments("s1").unwrap().is_empty());
}

#[test]
fn test_list_suggestions_newest_first() {
    let mut persistence: Persistence = setup_with_project();
    persistence
        .persist_suggestion(&create_plan("s-old", datetime!(2025-05-01 09:00 UTC), &[]))
        .unwrap();
    persistence
        .persist_suggestion(&create_plan("s-new", datetime!(2025-05-20 09:00 UTC), &[]))
        .unwrap();
    persistence
        .persist_suggestion(&create_plan("s-mid", datetime!(2025-05-10 09:00 UTC), &[]))
        .unwrap();

    let ids: Vec<String> = persistence
        .list_suggestions(None)
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();

    assert_eq!(ids, vec!["s-new", "s-mid", "s-old"]);
}

#[test]
fn test_list_suggestions_breaks_timestamp_ties_by_id() {
    let mut persistence: Persistence = setup_with_project();
    for id in ["s-a", "s-c", "s-b"] {
        persistence
            .persist_suggestion(&create_plan(id, fixed_now(), &[]))
            .unwrap();
    }

    let ids: Vec<String> = persistence
        .list_suggestions(None)
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();

    assert_eq!(ids, vec!["s-c", "s-b", "s-a"]);
}

#[test]
fn test_list_suggestions_filters_by_month() {
    let mut persistence: Persistence = setup_with_project();
    persistence
        .persist_suggestion(&create_plan("s-june", fixed_now(), &[]))
        .unwrap();
    let mut july: SuggestionPlan = create_plan("s-july", fixed_now(), &[]);
    july.suggestion.month = "2025-07".parse().unwrap();
    persistence.persist_suggestion(&july).unwrap();

    let june: Vec<OptimizationSuggestion> = persistence
        .list_suggestions(Some("2025-06".parse().unwrap()))
        .unwrap();

    assert_eq!(june.len(), 1);
    assert_eq!(june[0].id, "s-june");
}

#[test]
fn test_reject_pending_suggestion() {
    let mut persistence: Persistence = setup_with_project();
    persistence
        .persist_suggestion(&create_plan("s1", fixed_now(), &[("u1", "p1", "2025-06-02")]))
        .unwrap();

    let rejected: OptimizationSuggestion = persistence.reject_suggestion("s1").unwrap();

    assert_eq!(rejected.status, SuggestionStatus::Rejected);
    assert!(rejected.approved_by.is_none());
    let stored: OptimizationSuggestion = persistence.get_suggestion("s1").unwrap().unwrap();
    assert_eq!(stored.status, SuggestionStatus::Rejected);
    assert!(stored.approved_at.is_none());
}

#[test]
fn test_reject_unknown_suggestion_is_not_found() {
    let mut persistence: Persistence = setup_with_project();

    let result = persistence.reject_suggestion("missing");

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_delete_suggestion_removes_assignments() {
    let mut persistence: Persistence = setup_with_project();
    persistence
        .persist_suggestion(&create_plan("s1", fixed_now(), &[("u1", "p1", "2025-06-02")]))
        .unwrap();

    assert!(persistence.delete_suggestion("s1").unwrap());

    assert!(persistence.get_suggestion("s1").unwrap().is_none());
    assert!(persistence.list_assignments("s1").unwrap().is_empty());
    assert!(!persistence.delete_suggestion("s1").unwrap());
}
