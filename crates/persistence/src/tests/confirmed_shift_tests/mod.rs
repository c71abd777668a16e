// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sifut_domain::{ConfirmedShift, parse_date};
use time::macros::datetime;

use crate::error::PersistenceError;
use crate::tests::{create_confirmed_shift, create_project, setup_with_project};
use crate::{ConfirmedShiftFilter, Persistence};

fn setup() -> Persistence {
    let mut persistence: Persistence = setup_with_project();
    persistence.create_project(&create_project("p2", 1)).unwrap();
    for shift in [
        create_confirmed_shift("cs-1", "u1", "p1", "2025-06-03"),
        create_confirmed_shift("cs-2", "u2", "p1", "2025-06-01"),
        create_confirmed_shift("cs-3", "u1", "p2", "2025-06-20"),
        create_confirmed_shift("cs-4", "u1", "p1", "2025-07-01"),
    ] {
        persistence.create_confirmed_shift(&shift).unwrap();
    }
    persistence
}

fn ids(shifts: Vec<ConfirmedShift>) -> Vec<String> {
    shifts.into_iter().map(|s| s.id).collect()
}

#[test]
fn test_create_and_get_confirmed_shift() {
    let mut persistence: Persistence = setup();

    let shift: ConfirmedShift = persistence.get_confirmed_shift("cs-1").unwrap().unwrap();

    assert_eq!(shift, create_confirmed_shift("cs-1", "u1", "p1", "2025-06-03"));
}

#[test]
fn test_create_confirmed_shift_for_unknown_project_fails() {
    let mut persistence: Persistence = setup();

    let result: Result<(), PersistenceError> = persistence
        .create_confirmed_shift(&create_confirmed_shift("cs-9", "u1", "nope", "2025-06-03"));

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
    assert!(persistence.get_confirmed_shift("cs-9").unwrap().is_none());
}

#[test]
fn test_list_orders_by_date() {
    let mut persistence: Persistence = setup();

    let listed = persistence
        .list_confirmed_shifts(&ConfirmedShiftFilter::default())
        .unwrap();

    assert_eq!(ids(listed), vec!["cs-2", "cs-1", "cs-3", "cs-4"]);
}

#[test]
fn test_list_breaks_same_slot_ties_by_member_then_id() {
    let mut persistence: Persistence = setup_with_project();
    for shift in [
        create_confirmed_shift("cs-z", "u1", "p1", "2025-06-02"),
        create_confirmed_shift("cs-y", "u2", "p1", "2025-06-02"),
        create_confirmed_shift("cs-x", "u1", "p1", "2025-06-02"),
    ] {
        persistence.create_confirmed_shift(&shift).unwrap();
    }

    let listed: Vec<ConfirmedShift> = persistence
        .list_confirmed_shifts(&ConfirmedShiftFilter::default())
        .unwrap();

    assert_eq!(ids(listed), vec!["cs-x", "cs-z", "cs-y"]);
}

#[test]
fn test_list_filters_by_user_project_and_dates() {
    let mut persistence: Persistence = setup();

    let by_user = persistence
        .list_confirmed_shifts(&ConfirmedShiftFilter {
            user_id: Some(String::from("u1")),
            ..ConfirmedShiftFilter::default()
        })
        .unwrap();
    assert_eq!(ids(by_user), vec!["cs-1", "cs-3", "cs-4"]);

    let by_project_in_june = persistence
        .list_confirmed_shifts(&ConfirmedShiftFilter {
            project_id: Some(String::from("p1")),
            start_date: Some(parse_date("2025-06-01").unwrap()),
            end_date: Some(parse_date("2025-06-30").unwrap()),
            ..ConfirmedShiftFilter::default()
        })
        .unwrap();
    assert_eq!(ids(by_project_in_june), vec!["cs-2", "cs-1"]);
}

#[test]
fn test_set_calendar_event_id() {
    let mut persistence: Persistence = setup();
    let synced_at = datetime!(2025-06-01 12:00 UTC);

    persistence
        .set_calendar_event_id("cs-1", "evt-123", synced_at)
        .unwrap();

    let shift: ConfirmedShift = persistence.get_confirmed_shift("cs-1").unwrap().unwrap();
    assert_eq!(shift.calendar_event_id.as_deref(), Some("evt-123"));
    assert_eq!(shift.updated_at, synced_at);
}

#[test]
fn test_set_calendar_event_id_unknown_shift_is_not_found() {
    let mut persistence: Persistence = setup();

    let result = persistence.set_calendar_event_id("missing", "evt-1", datetime!(2025-06-01 12:00 UTC));

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_clear_calendar_event_id() {
    let mut persistence: Persistence = setup();
    persistence
        .set_calendar_event_id("cs-1", "evt-123", datetime!(2025-06-01 12:00 UTC))
        .unwrap();
    let cleared_at = datetime!(2025-06-02 08:00 UTC);

    persistence.clear_calendar_event_id("cs-1", cleared_at).unwrap();

    let shift: ConfirmedShift = persistence.get_confirmed_shift("cs-1").unwrap().unwrap();
    assert!(shift.calendar_event_id.is_none());
    assert_eq!(shift.updated_at, cleared_at);
    assert!(matches!(
        persistence.clear_calendar_event_id("missing", cleared_at),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_delete_confirmed_shift() {
    let mut persistence: Persistence = setup();

    assert!(persistence.delete_confirmed_shift("cs-2").unwrap());
    assert!(!persistence.delete_confirmed_shift("cs-2").unwrap());
    assert!(persistence.get_confirmed_shift("cs-2").unwrap().is_none());
}
