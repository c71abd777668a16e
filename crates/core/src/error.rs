// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sifut_domain::{DomainError, Month};

use crate::oracle::OracleFailure;

/// Errors that can occur in the optimization workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// No submitted shift requests fall in the month.
    NoSubmittedRequests {
        /// The requested month.
        month: Month,
    },
    /// No project is active.
    NoActiveProjects,
    /// The oracle call itself failed.
    OptimizationFailed(OracleFailure),
    /// The oracle answered with a payload of the wrong shape.
    OracleContract(String),
}

impl CoreError {
    /// Whether the failure is an unmet precondition rather than a fault.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoSubmittedRequests { .. } | Self::NoActiveProjects)
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NoSubmittedRequests { month } => {
                write!(f, "No submitted shift requests found for {month}")
            }
            Self::NoActiveProjects => write!(f, "No active projects found"),
            Self::OptimizationFailed(failure) => {
                write!(f, "Failed to generate optimization: {failure}")
            }
            Self::OracleContract(msg) => {
                write!(f, "Optimization response violates the expected format: {msg}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<OracleFailure> for CoreError {
    fn from(failure: OracleFailure) -> Self {
        Self::OptimizationFailed(failure)
    }
}
