// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `shift_requests`: member availability
//! - `projects`: staffing registry
//! - `suggestions`: optimization suggestions and their assignments
//! - `confirmed_shifts`: the binding schedule

pub mod confirmed_shifts;
pub mod projects;
pub mod shift_requests;
pub mod suggestions;

use sifut_domain::ShiftRequestStatus;
use time::Date;

/// Optional filters for listing shift requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftRequestFilter {
    pub user_id: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: Option<ShiftRequestStatus>,
}

/// Optional filters for listing confirmed shifts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmedShiftFilter {
    pub user_id: Option<String>,
    pub project_id: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}
