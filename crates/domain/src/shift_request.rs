// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime, Time};

use crate::error::DomainError;
use crate::schedule::TimeRange;

/// Lifecycle of a member's availability submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShiftRequestStatus {
    /// Created by the member and still editable.
    #[default]
    Draft,
    /// Handed in for scheduling. Eligible as optimization input.
    Submitted,
    /// Accepted by an administrator.
    Approved,
    /// Declined by an administrator.
    Rejected,
}

impl ShiftRequestStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Draft → Submitted
    /// - Submitted → Approved
    /// - Submitted → Rejected
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Submitted)
                | (Self::Submitted, Self::Approved | Self::Rejected)
        )
    }
}

impl FromStr for ShiftRequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidStatus {
                kind: "shift request",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ShiftRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member's self-reported availability for one interval on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftRequest {
    pub id: String,
    /// The owning member.
    pub user_id: String,
    pub date: Date,
    pub range: TimeRange,
    pub comment: Option<String>,
    pub status: ShiftRequestStatus,
    /// Set when the request moves to `submitted`.
    pub submitted_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A partial edit to a draft shift request.
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftRequestPatch {
    pub date: Option<Date>,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub comment: Option<String>,
}

impl ShiftRequest {
    /// Creates a new draft shift request.
    #[must_use]
    pub const fn new_draft(
        id: String,
        user_id: String,
        date: Date,
        range: TimeRange,
        comment: Option<String>,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            user_id,
            date,
            range,
            comment,
            status: ShiftRequestStatus::Draft,
            submitted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the owner may still edit or delete this request.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self.status, ShiftRequestStatus::Draft)
    }

    fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.is_editable() {
            Ok(())
        } else {
            Err(DomainError::ShiftRequestNotEditable {
                shift_request_id: self.id.clone(),
                status: self.status,
            })
        }
    }

    /// Produces the edited request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request is no longer a draft
    /// - The merged start/end times do not form a valid range
    pub fn apply_patch(
        &self,
        patch: ShiftRequestPatch,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        self.ensure_editable()?;

        let range: TimeRange = TimeRange::new(
            patch.start_time.unwrap_or_else(|| self.range.start()),
            patch.end_time.unwrap_or_else(|| self.range.end()),
        )?;

        Ok(Self {
            date: patch.date.unwrap_or(self.date),
            range,
            comment: patch.comment.or_else(|| self.comment.clone()),
            updated_at: now,
            ..self.clone()
        })
    }

    /// Moves the request from `draft` to `submitted`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is not a draft.
    pub fn submit(&self, now: OffsetDateTime) -> Result<Self, DomainError> {
        if !self.status.can_transition_to(ShiftRequestStatus::Submitted) {
            return Err(DomainError::InvalidShiftRequestTransition {
                from: self.status,
                to: ShiftRequestStatus::Submitted,
            });
        }

        Ok(Self {
            status: ShiftRequestStatus::Submitted,
            submitted_at: Some(now),
            updated_at: now,
            ..self.clone()
        })
    }

    /// Checks that the request may be deleted by its owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is no longer a draft.
    pub fn ensure_deletable(&self) -> Result<(), DomainError> {
        self.ensure_editable()
    }
}
