// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure planning of ledger writes.
//!
//! Nothing here touches storage. Each function returns the complete set of
//! records one atomic write must produce, so the store only has to apply it
//! inside a transaction.

use sifut_domain::{
    ConfirmedShift, OptimizationAssignment, OptimizationSuggestion, SuggestionStatus,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::contract::OracleResponse;
use crate::error::CoreError;
use crate::oracle::OptimizationTask;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A new suggestion together with its line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionPlan {
    pub suggestion: OptimizationSuggestion,
    pub assignments: Vec<OptimizationAssignment>,
}

/// The result of approving a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalPlan {
    /// The suggestion in its approved state.
    pub suggestion: OptimizationSuggestion,
    /// One confirmed shift per assignment, in assignment order.
    pub confirmed_shifts: Vec<ConfirmedShift>,
}

/// Plans a `pending` suggestion from a validated oracle reply.
#[must_use]
pub fn plan_suggestion(
    task: &OptimizationTask,
    response: OracleResponse,
    created_by: &str,
    now: OffsetDateTime,
) -> SuggestionPlan {
    let suggestion_id: String = new_id();

    let assignments: Vec<OptimizationAssignment> = response
        .assignments
        .into_iter()
        .map(|proposed| OptimizationAssignment {
            id: new_id(),
            suggestion_id: suggestion_id.clone(),
            user_id: proposed.user_id,
            project_id: proposed.project_id,
            date: proposed.date,
            range: proposed.range,
        })
        .collect();

    let suggestion: OptimizationSuggestion = OptimizationSuggestion {
        id: suggestion_id,
        month: task.month(),
        status: SuggestionStatus::Pending,
        summary: response.summary,
        created_by: created_by.to_string(),
        approved_by: None,
        approved_at: None,
        created_at: now,
    };

    SuggestionPlan {
        suggestion,
        assignments,
    }
}

/// Plans the approval of `suggestion`.
///
/// # Errors
///
/// Returns an error if the suggestion is already approved or was rejected.
pub fn plan_approval(
    suggestion: &OptimizationSuggestion,
    assignments: &[OptimizationAssignment],
    approved_by: &str,
    now: OffsetDateTime,
) -> Result<ApprovalPlan, CoreError> {
    suggestion.check_transition(SuggestionStatus::Approved)?;

    let confirmed_shifts: Vec<ConfirmedShift> = assignments
        .iter()
        .filter(|a| a.suggestion_id == suggestion.id)
        .map(|a| ConfirmedShift::from_assignment(new_id(), a, approved_by, now))
        .collect();

    let approved: OptimizationSuggestion = OptimizationSuggestion {
        status: SuggestionStatus::Approved,
        approved_by: Some(approved_by.to_string()),
        approved_at: Some(now),
        ..suggestion.clone()
    };

    Ok(ApprovalPlan {
        suggestion: approved,
        confirmed_shifts,
    })
}

/// Plans the rejection of `suggestion`.
///
/// Approver fields stay empty.
///
/// # Errors
///
/// Returns an error if the suggestion is already approved or rejected.
pub fn plan_rejection(
    suggestion: &OptimizationSuggestion,
) -> Result<OptimizationSuggestion, CoreError> {
    suggestion.check_transition(SuggestionStatus::Rejected)?;
    Ok(OptimizationSuggestion {
        status: SuggestionStatus::Rejected,
        ..suggestion.clone()
    })
}
