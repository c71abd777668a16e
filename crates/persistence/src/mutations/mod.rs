// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Multi-row writes (suggestion creation, approval, rejection and the
//! cascading deletes) each run in a single transaction and leave nothing
//! behind when any statement fails.

pub mod confirmed_shifts;
pub mod projects;
pub mod shift_requests;
pub mod suggestions;
