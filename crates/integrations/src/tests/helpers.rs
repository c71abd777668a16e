// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

use reqwest::Client;
use sifut::OptimizationTask;
use sifut_domain::{Project, ShiftRequest, ShiftRequestStatus, TimeRange};
use time::macros::{date, datetime, time};

use crate::build_http_client;

pub const SCHEDULE_JSON: &str = r#"{"assignments":[{"user_id":"u1","project_id":"p1","date":"2025-06-02","start_time":"09:00","end_time":"17:00"}],"summary":{"total_shifts":1,"members_utilized":1,"coverage_rate":50,"notes":[]}}"#;

pub fn test_http_client() -> Client {
    build_http_client(Duration::from_secs(5)).unwrap()
}

pub fn june_task() -> OptimizationTask {
    let now = datetime!(2025-05-28 10:00 UTC);
    let project = Project {
        id: String::from("p1"),
        name: String::from("Food bank"),
        description: None,
        required_members: 2,
        color: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    let request = ShiftRequest {
        status: ShiftRequestStatus::Submitted,
        ..ShiftRequest::new_draft(
            String::from("sr-1"),
            String::from("u1"),
            date!(2025 - 06 - 02),
            TimeRange::new(time!(9:00), time!(17:00)).unwrap(),
            None,
            now,
        )
    };

    OptimizationTask::new("2025-06".parse().unwrap(), &[project], &[request]).unwrap()
}
