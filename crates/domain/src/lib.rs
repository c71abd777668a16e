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

mod confirmed_shift;
mod error;
mod project;
mod schedule;
mod shift_request;
mod shift_window;
mod suggestion;


// Re-export public types
pub use confirmed_shift::ConfirmedShift;
pub use error::DomainError;
pub use project::{Project, validate_project_fields};
pub use schedule::{
    Month, TimeRange, format_date, format_timestamp, format_wall_clock, parse_date,
    parse_timestamp, parse_wall_clock,
};
pub use shift_request::{ShiftRequest, ShiftRequestPatch, ShiftRequestStatus};
pub use shift_window::{ShiftWindow, parse_timezone, resolve_shift_window};
pub use suggestion::{
    OptimizationAssignment, OptimizationSuggestion, OptimizationSummary, SuggestionStatus,
};
