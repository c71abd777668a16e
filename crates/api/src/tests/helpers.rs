// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use async_trait::async_trait;
use serde_json::json;
use sifut::{
    CalendarEvent, CalendarEventRef, CalendarFailure, CalendarGateway, OptimizationOracle,
    OptimizationTask, OracleFailure,
};
use sifut_domain::Project;
use sifut_persistence::Persistence;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use time::OffsetDateTime;

use crate::{
    AuthenticatedActor, CreateProjectRequest, CreateShiftRequestRequest, ProjectInfo, Role,
    ShiftRequestInfo, create_project, create_shift_request, submit_shift_request,
};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), Role::Admin)
}

pub fn create_test_member(id: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(id.to_string(), Role::Member)
}

/// An oracle that answers every task with a fixed reply.
pub struct ScriptedOracle {
    reply: Result<String, OracleFailure>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub const fn failing(failure: OracleFailure) -> Self {
        Self {
            reply: Err(failure),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OptimizationOracle for ScriptedOracle {
    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, _task: &OptimizationTask) -> Result<String, OracleFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// A calendar that records every event it is asked to create or delete.
#[derive(Default)]
pub struct RecordingCalendar {
    fail_with: Option<CalendarFailure>,
    pub created: StdMutex<Vec<CalendarEvent>>,
    pub deleted: StdMutex<Vec<String>>,
}

impl RecordingCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: CalendarFailure) -> Self {
        Self {
            fail_with: Some(failure),
            ..Self::default()
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

#[async_trait]
impl CalendarGateway for RecordingCalendar {
    async fn create_shift_event(
        &self,
        event: &CalendarEvent,
    ) -> Result<CalendarEventRef, CalendarFailure> {
        if let Some(failure) = &self.fail_with {
            return Err(failure.clone());
        }
        let mut created = self.created.lock().unwrap();
        created.push(event.clone());
        Ok(CalendarEventRef {
            event_id: format!("evt-{}", created.len()),
            html_link: Some(format!("https://calendar.test/evt-{}", created.len())),
        })
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), CalendarFailure> {
        if let Some(failure) = &self.fail_with {
            return Err(failure.clone());
        }
        self.deleted.lock().unwrap().push(event_id.to_string());
        Ok(())
    }
}

pub fn add_project(persistence: &mut Persistence, name: &str, required_members: i64) -> ProjectInfo {
    create_project(
        persistence,
        &CreateProjectRequest {
            name: name.to_string(),
            description: None,
            required_members,
            color: Some(String::from("#3366FF")),
        },
        &create_test_admin(),
    )
    .unwrap()
}

pub fn add_draft(
    persistence: &mut Persistence,
    member: &str,
    date: &str,
    start: &str,
    end: &str,
) -> ShiftRequestInfo {
    create_shift_request(
        persistence,
        &CreateShiftRequestRequest {
            date: date.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            comment: None,
        },
        &create_test_member(member),
    )
    .unwrap()
}

pub fn add_submitted(
    persistence: &mut Persistence,
    member: &str,
    date: &str,
    start: &str,
    end: &str,
) -> ShiftRequestInfo {
    let draft: ShiftRequestInfo = add_draft(persistence, member, date, start, end);
    submit_shift_request(persistence, &draft.id, &create_test_member(member)).unwrap()
}

/// The June 2025 scenario: active project `p1` needing two members, with
/// u1 available 09:00-17:00 and u2 13:00-21:00 on 2025-06-02.
pub fn setup_june_scenario() -> (Persistence, ProjectInfo) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let project: Project = Project {
        id: String::from("p1"),
        name: String::from("Reception"),
        description: None,
        required_members: 2,
        color: Some(String::from("#3366FF")),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    persistence.create_project(&project).unwrap();
    add_submitted(&mut persistence, "u1", "2025-06-02", "09:00", "17:00");
    add_submitted(&mut persistence, "u2", "2025-06-02", "13:00", "21:00");
    (persistence, ProjectInfo::from(&project))
}

/// A half-covering answer to the June scenario: u1 alone on 09:00-17:00.
pub fn june_single_reply(project_id: &str) -> String {
    json!({
        "assignments": [
            {"user_id": "u1", "project_id": project_id, "date": "2025-06-02",
             "start_time": "09:00", "end_time": "17:00"}
        ],
        "summary": {
            "total_shifts": 1,
            "members_utilized": 1,
            "coverage_rate": 50,
            "notes": []
        }
    })
    .to_string()
}

/// A two-shift answer to the June scenario with a different range per member.
pub fn june_reply(project_id: &str) -> String {
    json!({
        "assignments": [
            {"user_id": "u1", "project_id": project_id, "date": "2025-06-02",
             "start_time": "09:00", "end_time": "13:00"},
            {"user_id": "u2", "project_id": project_id, "date": "2025-06-02",
             "start_time": "17:00", "end_time": "21:00"}
        ],
        "summary": {
            "total_shifts": 2,
            "members_utilized": 2,
            "coverage_rate": 1.0,
            "notes": ["Split the day between both members"]
        }
    })
    .to_string()
}
