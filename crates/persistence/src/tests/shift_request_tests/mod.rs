// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sifut_domain::{ShiftRequest, ShiftRequestPatch, ShiftRequestStatus, parse_date, parse_wall_clock};
use time::macros::datetime;

use crate::error::PersistenceError;
use crate::tests::{create_request, fixed_now};
use crate::{Persistence, ShiftRequestFilter};

fn setup() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for request in [
        create_request("sr-1", "u1", "2025-06-02", ShiftRequestStatus::Submitted),
        create_request("sr-2", "u1", "2025-06-01", ShiftRequestStatus::Draft),
        create_request("sr-3", "u2", "2025-06-30", ShiftRequestStatus::Submitted),
        create_request("sr-4", "u2", "2025-07-01", ShiftRequestStatus::Submitted),
        create_request("sr-5", "u3", "2025-05-31", ShiftRequestStatus::Submitted),
    ] {
        persistence.create_shift_request(&request).unwrap();
    }
    persistence
}

#[test]
fn test_create_and_get_round_trips_every_field() {
    let mut persistence: Persistence = setup();
    let expected: ShiftRequest =
        create_request("sr-1", "u1", "2025-06-02", ShiftRequestStatus::Submitted);

    let loaded: ShiftRequest = persistence.get_shift_request("sr-1").unwrap().unwrap();

    assert_eq!(loaded, expected);
}

#[test]
fn test_get_unknown_shift_request_returns_none() {
    let mut persistence: Persistence = setup();
    assert!(persistence.get_shift_request("missing").unwrap().is_none());
}

#[test]
fn test_list_orders_by_date() {
    let mut persistence: Persistence = setup();

    let ids: Vec<String> = persistence
        .list_shift_requests(&ShiftRequestFilter::default())
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();

    assert_eq!(ids, vec!["sr-5", "sr-2", "sr-1", "sr-3", "sr-4"]);
}

#[test]
fn test_list_breaks_same_slot_ties_by_member_then_id() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for request in [
        create_request("sr-c", "u2", "2025-06-02", ShiftRequestStatus::Submitted),
        create_request("sr-b", "u1", "2025-06-02", ShiftRequestStatus::Draft),
        create_request("sr-a", "u2", "2025-06-02", ShiftRequestStatus::Draft),
    ] {
        persistence.create_shift_request(&request).unwrap();
    }

    let ids: Vec<String> = persistence
        .list_shift_requests(&ShiftRequestFilter::default())
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();

    assert_eq!(ids, vec!["sr-b", "sr-a", "sr-c"]);
}

#[test]
fn test_list_filters_by_user_and_status() {
    let mut persistence: Persistence = setup();

    let filter: ShiftRequestFilter = ShiftRequestFilter {
        user_id: Some(String::from("u1")),
        status: Some(ShiftRequestStatus::Draft),
        ..ShiftRequestFilter::default()
    };
    let requests: Vec<ShiftRequest> = persistence.list_shift_requests(&filter).unwrap();

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].id, "sr-2");
}

#[test]
fn test_list_filters_by_inclusive_date_range() {
    let mut persistence: Persistence = setup();

    let filter: ShiftRequestFilter = ShiftRequestFilter {
        start_date: Some(parse_date("2025-06-01").unwrap()),
        end_date: Some(parse_date("2025-06-30").unwrap()),
        ..ShiftRequestFilter::default()
    };
    let requests: Vec<ShiftRequest> = persistence.list_shift_requests(&filter).unwrap();

    assert_eq!(requests.len(), 3);
}

#[test]
fn test_list_submitted_in_month_excludes_drafts_and_other_months() {
    let mut persistence: Persistence = setup();

    let ids: Vec<String> = persistence
        .list_submitted_in_month("2025-06".parse().unwrap())
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();

    assert_eq!(ids, vec!["sr-1", "sr-3"]);
}

#[test]
fn test_update_persists_patched_request() {
    let mut persistence: Persistence = setup();
    let original: ShiftRequest = persistence.get_shift_request("sr-2").unwrap().unwrap();

    let patched: ShiftRequest = original
        .apply_patch(
            ShiftRequestPatch {
                end_time: Some(parse_wall_clock("12:00").unwrap()),
                ..ShiftRequestPatch::default()
            },
            datetime!(2025-05-29 08:00 UTC),
        )
        .unwrap();
    persistence.update_shift_request(&patched).unwrap();

    let loaded: ShiftRequest = persistence.get_shift_request("sr-2").unwrap().unwrap();
    assert_eq!(loaded, patched);
    assert_eq!(loaded.created_at, fixed_now());
}

#[test]
fn test_update_persists_submission() {
    let mut persistence: Persistence = setup();
    let draft: ShiftRequest = persistence.get_shift_request("sr-2").unwrap().unwrap();

    let submitted: ShiftRequest = draft.submit(datetime!(2025-05-30 12:30:15.25 UTC)).unwrap();
    persistence.update_shift_request(&submitted).unwrap();

    let loaded: ShiftRequest = persistence.get_shift_request("sr-2").unwrap().unwrap();
    assert_eq!(loaded.status, ShiftRequestStatus::Submitted);
    assert_eq!(loaded.submitted_at, Some(datetime!(2025-05-30 12:30:15.25 UTC)));
}

#[test]
fn test_update_unknown_request_is_not_found() {
    let mut persistence: Persistence = setup();
    let ghost: ShiftRequest = create_request("ghost", "u9", "2025-06-05", ShiftRequestStatus::Draft);

    let result: Result<(), PersistenceError> = persistence.update_shift_request(&ghost);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_delete_reports_whether_row_existed() {
    let mut persistence: Persistence = setup();

    assert!(persistence.delete_shift_request("sr-2").unwrap());
    assert!(!persistence.delete_shift_request("sr-2").unwrap());
    assert!(persistence.get_shift_request("sr-2").unwrap().is_none());
}
