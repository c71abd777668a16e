// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod calendar;
mod contract;
mod error;
mod oracle;
mod plan;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use calendar::{CalendarEvent, CalendarEventRef, CalendarFailure, CalendarGateway};
pub use contract::{
    OracleResponse, ProposedAssignment, extract_json_object, interpret_reply,
    request_optimization, validate_oracle_response,
};
pub use error::CoreError;
pub use oracle::{
    OptimizationOracle, OptimizationTask, OracleFailure, TaskProject, TaskShiftRequest,
};
pub use plan::{ApprovalPlan, SuggestionPlan, plan_approval, plan_rejection, plan_suggestion};
