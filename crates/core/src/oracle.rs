// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The optimization oracle contract.
//!
//! The oracle is an external text-completion service. It is handed one
//! month's submitted availability and active staffing needs, and it answers
//! with free text that should contain a JSON object of the shape
//!
//! ```text
//! { "assignments": [ { user_id, project_id, date, start_time, end_time } ],
//!   "summary": { total_shifts, members_utilized, coverage_rate, notes } }
//! ```
//!
//! Providers only move text. Extraction and validation of the reply happen
//! in [`crate::contract`], identically for every provider.

use async_trait::async_trait;
use serde_json::{Value, json};
use sifut_domain::{
    Month, Project, ShiftRequest, ShiftRequestStatus, format_date, format_wall_clock,
};

use crate::error::CoreError;

/// A project as presented to the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskProject {
    pub id: String,
    pub name: String,
    pub required_members: u32,
}

/// A member's availability as presented to the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskShiftRequest {
    pub user_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub comment: Option<String>,
}

/// Everything the oracle needs to propose a schedule for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationTask {
    month: Month,
    projects: Vec<TaskProject>,
    shift_requests: Vec<TaskShiftRequest>,
}

impl OptimizationTask {
    /// Builds the task from candidate records.
    ///
    /// Only submitted requests dated inside `month` and only active projects
    /// are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No submitted request falls in the month
    /// - No project is active
    pub fn new(
        month: Month,
        projects: &[Project],
        shift_requests: &[ShiftRequest],
    ) -> Result<Self, CoreError> {
        let shift_requests: Vec<TaskShiftRequest> = shift_requests
            .iter()
            .filter(|r| r.status == ShiftRequestStatus::Submitted && month.contains(r.date))
            .map(|r| TaskShiftRequest {
                user_id: r.user_id.clone(),
                date: format_date(r.date),
                start_time: format_wall_clock(r.range.start()),
                end_time: format_wall_clock(r.range.end()),
                comment: r.comment.clone(),
            })
            .collect();

        if shift_requests.is_empty() {
            return Err(CoreError::NoSubmittedRequests { month });
        }

        let projects: Vec<TaskProject> = projects
            .iter()
            .filter(|p| p.is_active)
            .map(|p| TaskProject {
                id: p.id.clone(),
                name: p.name.clone(),
                required_members: p.required_members,
            })
            .collect();

        if projects.is_empty() {
            return Err(CoreError::NoActiveProjects);
        }

        Ok(Self {
            month,
            projects,
            shift_requests,
        })
    }

    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    #[must_use]
    pub fn projects(&self) -> &[TaskProject] {
        &self.projects
    }

    #[must_use]
    pub fn shift_requests(&self) -> &[TaskShiftRequest] {
        &self.shift_requests
    }

    /// Whether `project_id` was offered to the oracle.
    #[must_use]
    pub fn offers_project(&self, project_id: &str) -> bool {
        self.projects.iter().any(|p| p.id == project_id)
    }

    fn projects_json(&self) -> Value {
        Value::Array(
            self.projects
                .iter()
                .map(|p| {
                    json!({
                        "id": p.id,
                        "name": p.name,
                        "required_members": p.required_members,
                    })
                })
                .collect(),
        )
    }

    fn shift_requests_json(&self) -> Value {
        Value::Array(
            self.shift_requests
                .iter()
                .map(|r| {
                    json!({
                        "user_id": r.user_id,
                        "date": r.date,
                        "start_time": r.start_time,
                        "end_time": r.end_time,
                        "comment": r.comment,
                    })
                })
                .collect(),
        )
    }

    /// Renders the instruction text shared by every provider.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            r#"You are the scheduling assistant of a volunteer organization's shift management system.
Propose an optimal shift assignment based on the shift requests and project information below.

## Target month
{month}

## Projects
{projects:#}

## Shift requests
{requests:#}

## Optimization conditions
1. Meet each project's required_members.
2. Respect each member's requested times as much as possible.
3. Do not concentrate the load on any single member.
4. Never assign overlapping shifts to the same member.

## Output format
Respond with JSON in exactly this format:
{{
  "assignments": [
    {{
      "user_id": "member id",
      "project_id": "project id",
      "date": "YYYY-MM-DD",
      "start_time": "HH:MM",
      "end_time": "HH:MM"
    }}
  ],
  "summary": {{
    "total_shifts": total number of shifts,
    "members_utilized": number of members used,
    "coverage_rate": coverage in percent,
    "notes": ["note 1", "note 2"]
  }}
}}
"#,
            month = self.month,
            projects = self.projects_json(),
            requests = self.shift_requests_json(),
        )
    }
}

/// Ways an oracle call can fail before any reply is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleFailure {
    /// The provider could not be reached.
    Network(String),
    /// The call exceeded its deadline.
    Timeout,
    /// The provider rejected the credentials.
    Authentication(String),
    /// The provider throttled the call.
    RateLimited,
    /// The provider answered with a non-success status.
    Provider {
        /// HTTP status code.
        status: u16,
        /// Provider error message.
        message: String,
    },
    /// The reply carried no usable text or no JSON object.
    MalformedOutput(String),
}

impl std::fmt::Display for OracleFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {msg}"),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Authentication(msg) => write!(f, "Authentication failed: {msg}"),
            Self::RateLimited => write!(f, "Rate limit exceeded"),
            Self::Provider { status, message } => {
                write!(f, "Provider error ({status}): {message}")
            }
            Self::MalformedOutput(msg) => write!(f, "Malformed output: {msg}"),
        }
    }
}

impl std::error::Error for OracleFailure {}

/// An external service that proposes a month's schedule.
#[async_trait]
pub trait OptimizationOracle: Send + Sync {
    /// Short provider name, for logs.
    fn provider_name(&self) -> &'static str;

    /// Sends the task and returns the provider's raw reply text.
    async fn complete(&self, task: &OptimizationTask) -> Result<String, OracleFailure>;
}
