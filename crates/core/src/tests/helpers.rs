// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sifut_domain::{
    Month, Project, ShiftRequest, ShiftRequestStatus, TimeRange, parse_date, parse_wall_clock,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::OptimizationTask;

pub fn fixed_now() -> OffsetDateTime {
    datetime!(2025-05-28 10:00 UTC)
}

pub fn june() -> Month {
    "2025-06".parse().unwrap()
}

pub fn create_project(id: &str, required_members: u32, is_active: bool) -> Project {
    Project {
        id: id.to_string(),
        name: format!("Project {id}"),
        description: None,
        required_members,
        color: None,
        is_active,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

pub fn create_request(
    user_id: &str,
    date: &str,
    start: &str,
    end: &str,
    status: ShiftRequestStatus,
) -> ShiftRequest {
    let range: TimeRange =
        TimeRange::new(parse_wall_clock(start).unwrap(), parse_wall_clock(end).unwrap()).unwrap();
    ShiftRequest {
        status,
        ..ShiftRequest::new_draft(
            format!("sr-{user_id}-{date}"),
            user_id.to_string(),
            parse_date(date).unwrap(),
            range,
            None,
            fixed_now(),
        )
    }
}

/// The June 2025 scenario: one active project p1 needing two members, and
/// submitted requests from u1 (09:00-17:00) and u2 (13:00-21:00).
pub fn june_task() -> OptimizationTask {
    OptimizationTask::new(
        june(),
        &[create_project("p1", 2, true)],
        &[
            create_request("u1", "2025-06-02", "09:00", "17:00", ShiftRequestStatus::Submitted),
            create_request("u2", "2025-06-02", "13:00", "21:00", ShiftRequestStatus::Submitted),
        ],
    )
    .unwrap()
}
