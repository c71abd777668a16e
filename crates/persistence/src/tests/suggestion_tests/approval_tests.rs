// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::RunQueryDsl;
use std::sync::{Arc, Barrier};
use std::thread;
use sifut::{ApprovalPlan, CoreError};
use sifut_domain::{ConfirmedShift, DomainError, OptimizationSuggestion, SuggestionStatus};
use time::OffsetDateTime;
use tempfile::TempDir;
use time::macros::datetime;

use crate::error::PersistenceError;
use crate::tests::{create_plan, create_project, fixed_now, range, setup_with_project};
use crate::{ConfirmedShiftFilter, Persistence};

fn approval_time() -> OffsetDateTime {
    datetime!(2025-05-29 09:15 UTC)
}

fn setup_pending() -> Persistence {
    let mut persistence: Persistence = setup_with_project();
    persistence
        .persist_suggestion(&create_plan(
            "s1",
            fixed_now(),
            &[("u1", "p1", "2025-06-02"), ("u2", "p1", "2025-06-02")],
        ))
        .unwrap();
    persistence
}

fn all_shifts(persistence: &mut Persistence) -> Vec<ConfirmedShift> {
    persistence
        .list_confirmed_shifts(&ConfirmedShiftFilter::default())
        .unwrap()
}

#[test]
fn test_approve_creates_one_shift_per_assignment() {
    let mut persistence: Persistence = setup_pending();

    let plan: ApprovalPlan = persistence
        .approve_suggestion("s1", "admin-2", approval_time())
        .unwrap();

    assert_eq!(plan.confirmed_shifts.len(), 2);
    let shifts: Vec<ConfirmedShift> = all_shifts(&mut persistence);
    assert_eq!(shifts.len(), 2);
    for shift in &shifts {
        assert_eq!(shift.project_id, "p1");
        assert_eq!(shift.range, range("09:00", "17:00"));
        assert_eq!(shift.created_by, "admin-2");
        assert_eq!(shift.created_at, approval_time());
        assert!(shift.calendar_event_id.is_none());
    }
    let mut users: Vec<String> = shifts.into_iter().map(|s| s.user_id).collect();
    users.sort();
    assert_eq!(users, vec!["u1", "u2"]);
}

#[test]
fn test_approve_records_approver_and_time() {
    let mut persistence: Persistence = setup_pending();

    persistence
        .approve_suggestion("s1", "admin-2", approval_time())
        .unwrap();

    let stored: OptimizationSuggestion = persistence.get_suggestion("s1").unwrap().unwrap();
    assert_eq!(stored.status, SuggestionStatus::Approved);
    assert_eq!(stored.approved_by.as_deref(), Some("admin-2"));
    assert_eq!(stored.approved_at, Some(approval_time()));
}

#[test]
fn test_approve_twice_is_rejected_without_duplicate_shifts() {
    let mut persistence: Persistence = setup_pending();
    persistence
        .approve_suggestion("s1", "admin-2", approval_time())
        .unwrap();

    let result: Result<ApprovalPlan, PersistenceError> =
        persistence.approve_suggestion("s1", "admin-3", approval_time());

    assert!(matches!(
        result,
        Err(PersistenceError::TransitionRejected(CoreError::DomainViolation(
            DomainError::SuggestionAlreadyApproved { .. }
        )))
    ));
    assert_eq!(all_shifts(&mut persistence).len(), 2);
    let stored: OptimizationSuggestion = persistence.get_suggestion("s1").unwrap().unwrap();
    assert_eq!(stored.approved_by.as_deref(), Some("admin-2"));
}

#[test]
fn test_approve_unknown_suggestion_is_not_found() {
    let mut persistence: Persistence = setup_pending();

    let result = persistence.approve_suggestion("missing", "admin-2", approval_time());

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    assert!(all_shifts(&mut persistence).is_empty());
}

#[test]
fn test_approve_rejected_suggestion_is_invalid_transition() {
    let mut persistence: Persistence = setup_pending();
    persistence.reject_suggestion("s1").unwrap();

    let result = persistence.approve_suggestion("s1", "admin-2", approval_time());

    assert!(matches!(
        result,
        Err(PersistenceError::TransitionRejected(CoreError::DomainViolation(
            DomainError::InvalidSuggestionTransition {
                from: SuggestionStatus::Rejected,
                to: SuggestionStatus::Approved,
                ..
            }
        )))
    ));
    assert!(all_shifts(&mut persistence).is_empty());
}

#[test]
fn test_reject_approved_suggestion_reports_already_approved() {
    let mut persistence: Persistence = setup_pending();
    persistence
        .approve_suggestion("s1", "admin-2", approval_time())
        .unwrap();

    let result = persistence.reject_suggestion("s1");

    assert!(matches!(
        result,
        Err(PersistenceError::TransitionRejected(CoreError::DomainViolation(
            DomainError::SuggestionAlreadyApproved { .. }
        )))
    ));
}

#[test]
fn test_failed_shift_insert_rolls_back_entire_approval() {
    let mut persistence: Persistence = setup_pending();
    diesel::sql_query(
        "CREATE TRIGGER fail_second_shift BEFORE INSERT ON confirmed_shifts \
         WHEN (SELECT COUNT(*) FROM confirmed_shifts) >= 1 \
         BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
    )
    .execute(&mut persistence.conn)
    .unwrap();

    let result = persistence.approve_suggestion("s1", "admin-2", approval_time());

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
    assert!(all_shifts(&mut persistence).is_empty());
    let stored: OptimizationSuggestion = persistence.get_suggestion("s1").unwrap().unwrap();
    assert_eq!(stored.status, SuggestionStatus::Pending);
    assert!(stored.approved_by.is_none());
    assert!(stored.approved_at.is_none());
}

#[test]
fn test_approval_succeeds_after_failed_attempt() {
    let mut persistence: Persistence = setup_pending();
    diesel::sql_query(
        "CREATE TRIGGER fail_all_shifts BEFORE INSERT ON confirmed_shifts \
         BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
    )
    .execute(&mut persistence.conn)
    .unwrap();
    assert!(
        persistence
            .approve_suggestion("s1", "admin-2", approval_time())
            .is_err()
    );

    diesel::sql_query("DROP TRIGGER fail_all_shifts")
        .execute(&mut persistence.conn)
        .unwrap();
    let plan: ApprovalPlan = persistence
        .approve_suggestion("s1", "admin-2", approval_time())
        .unwrap();

    assert_eq!(plan.confirmed_shifts.len(), 2);
    assert_eq!(all_shifts(&mut persistence).len(), 2);
}

#[test]
fn test_concurrent_approvals_across_connections_have_one_winner() {
    let dir: TempDir = TempDir::new().unwrap();
    let path = dir.path().join("sifut.db");
    let mut seed: Persistence = Persistence::new_with_file(&path).unwrap();
    seed.create_project(&create_project("p1", 2)).unwrap();

    for round in 0..10 {
        let suggestion_id: String = format!("s{round}");
        seed.persist_suggestion(&create_plan(
            &suggestion_id,
            fixed_now(),
            &[("u1", "p1", "2025-06-02"), ("u2", "p1", "2025-06-03")],
        ))
        .unwrap();

        let barrier: Arc<Barrier> = Arc::new(Barrier::new(2));
        let spawn_approver = |approver: &str| {
            let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
            let barrier: Arc<Barrier> = Arc::clone(&barrier);
            let suggestion_id: String = suggestion_id.clone();
            let approver: String = approver.to_string();
            thread::spawn(move || {
                barrier.wait();
                persistence.approve_suggestion(&suggestion_id, &approver, approval_time())
            })
        };
        let first = spawn_approver("admin-a");
        let second = spawn_approver("admin-b");
        let outcomes: [Result<ApprovalPlan, PersistenceError>; 2] =
            [first.join().unwrap(), second.join().unwrap()];

        assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
        let loser: &PersistenceError = outcomes
            .iter()
            .find_map(|outcome| outcome.as_ref().err())
            .unwrap();
        assert!(
            matches!(
                loser,
                PersistenceError::TransitionRejected(CoreError::DomainViolation(
                    DomainError::SuggestionAlreadyApproved { .. }
                ))
            ),
            "round {round}: unexpected loser error {loser:?}"
        );

        let stored: OptimizationSuggestion =
            seed.get_suggestion(&suggestion_id).unwrap().unwrap();
        assert_eq!(stored.status, SuggestionStatus::Approved);
    }

    assert_eq!(all_shifts(&mut seed).len(), 20);
}
