// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Optimization suggestions and their line-item assignments.
//!
//! ## Invariants
//!
//! - A suggestion starts `pending`
//! - `pending` may move to `approved` or `rejected`, exactly once
//! - `approved` and `rejected` are terminal
//! - Re-approving is reported as `SuggestionAlreadyApproved`, never ignored
//! - Assignments exist only as children of one suggestion

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

use crate::error::DomainError;
use crate::schedule::{Month, TimeRange};

/// Review state of an optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    /// Persisted and awaiting administrator review.
    #[default]
    Pending,
    /// Materialized into confirmed shifts.
    Approved,
    /// Discarded by an administrator.
    Rejected,
}

impl SuggestionStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Approved
    /// - Pending → Rejected
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Rejected)
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl FromStr for SuggestionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidStatus {
                kind: "suggestion",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The oracle's summary of a run.
///
/// The payload is opaque and kept verbatim. The accessors read the
/// well-known keys (`total_shifts`, `members_utilized`, `coverage_rate`,
/// `notes`) when they are present and well-typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptimizationSummary(Map<String, Value>);

impl OptimizationSummary {
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn total_shifts(&self) -> Option<u64> {
        self.0.get("total_shifts").and_then(Value::as_u64)
    }

    #[must_use]
    pub fn members_utilized(&self) -> Option<u64> {
        self.0.get("members_utilized").and_then(Value::as_u64)
    }

    #[must_use]
    pub fn coverage_rate(&self) -> Option<f64> {
        self.0.get("coverage_rate").and_then(Value::as_f64)
    }

    #[must_use]
    pub fn notes(&self) -> Vec<&str> {
        self.0
            .get("notes")
            .and_then(Value::as_array)
            .map(|notes| notes.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// One optimization run for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationSuggestion {
    pub id: String,
    pub month: Month,
    pub status: SuggestionStatus,
    pub summary: OptimizationSummary,
    /// The administrator who requested the run.
    pub created_by: String,
    /// The administrator who approved or rejected the run.
    pub approved_by: Option<String>,
    pub approved_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl OptimizationSuggestion {
    /// Checks that this suggestion may move to `target`.
    ///
    /// # Errors
    ///
    /// Returns `SuggestionAlreadyApproved` if the suggestion is approved,
    /// or `InvalidSuggestionTransition` for any other disallowed move.
    pub fn check_transition(&self, target: SuggestionStatus) -> Result<(), DomainError> {
        if self.status == SuggestionStatus::Approved {
            return Err(DomainError::SuggestionAlreadyApproved {
                suggestion_id: self.id.clone(),
            });
        }
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidSuggestionTransition {
                suggestion_id: self.id.clone(),
                from: self.status,
                to: target,
            });
        }
        Ok(())
    }
}

/// One proposed (member, project, date, time range) line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationAssignment {
    pub id: String,
    /// The owning suggestion.
    pub suggestion_id: String,
    pub user_id: String,
    pub project_id: String,
    pub date: Date,
    pub range: TimeRange,
}
