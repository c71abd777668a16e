// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use sifut::CoreError;
use sifut_domain::DomainError;
use sifut_persistence::PersistenceError;
use tracing::error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The caller's identity could not be established.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller may not perform the action.
    AccessDenied {
        /// The action that was attempted.
        action: String,
        /// Why the caller was refused.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::AccessDenied { action, reason } => {
                write!(f, "Access denied for '{action}': {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller's identity could not be established.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller lacks the role or ownership the action needs.
    AccessDenied {
        /// The action that was attempted.
        action: String,
        /// Why the caller was refused.
        reason: String,
    },
    /// There is nothing to optimize for the month.
    NoData {
        /// A human-readable description of what is missing.
        message: String,
    },
    /// The oracle could not be reached or returned no usable reply.
    OptimizationFailed {
        /// A description of the failure.
        message: String,
    },
    /// The oracle's reply does not have the agreed shape.
    OracleContract {
        /// A description of the violation.
        message: String,
    },
    /// The suggestion has already been approved.
    AlreadyApproved {
        /// The suggestion ID.
        suggestion_id: String,
    },
    /// The record is not in a state that allows the operation.
    InvalidTransition {
        /// A human-readable description of the refused transition.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Stable machine-readable name of the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "AuthenticationError",
            Self::AccessDenied { .. } => "AccessDeniedError",
            Self::NoData { .. } => "NoDataError",
            Self::OptimizationFailed { .. } => "OptimizationFailedError",
            Self::OracleContract { .. } => "OracleContractError",
            Self::AlreadyApproved { .. } => "AlreadyApprovedError",
            Self::InvalidTransition { .. } => "InvalidTransitionError",
            Self::InvalidInput { .. } => "InvalidInputError",
            Self::ResourceNotFound { .. } => "NotFoundError",
            Self::Internal { .. } => "InternalError",
        }
    }

    pub(crate) fn not_found(resource_type: &str, id: &str) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: format!("{resource_type} '{id}' does not exist"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::AccessDenied { action, reason } => {
                write!(f, "Access denied for '{action}': {reason}")
            }
            Self::NoData { message }
            | Self::OptimizationFailed { message }
            | Self::OracleContract { message }
            | Self::InvalidTransition { message } => write!(f, "{message}"),
            Self::AlreadyApproved { .. } => write!(f, "Optimization already approved"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::AccessDenied { action, reason } => Self::AccessDenied { action, reason },
        }
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidMonth(_) => invalid_input("month", &err),
        DomainError::DateParseError { .. } | DomainError::DateOutsideMonth { .. } => {
            invalid_input("date", &err)
        }
        DomainError::TimeParseError { .. } => invalid_input("time", &err),
        DomainError::InvalidTimeRange { .. } => invalid_input("end_time", &err),
        DomainError::InvalidProjectName(_) => invalid_input("name", &err),
        DomainError::InvalidRequiredMembers { .. } => invalid_input("required_members", &err),
        DomainError::InvalidStatus { .. } => invalid_input("status", &err),
        DomainError::InvalidTimezone(_) => invalid_input("time_zone", &err),
        DomainError::UnresolvableLocalTime { .. } => invalid_input("start_time", &err),
        DomainError::InvalidShiftRequestTransition { .. }
        | DomainError::ShiftRequestNotEditable { .. }
        | DomainError::InvalidSuggestionTransition { .. } => ApiError::InvalidTransition {
            message: err.to_string(),
        },
        DomainError::SuggestionAlreadyApproved { suggestion_id } => ApiError::AlreadyApproved {
            suggestion_id: suggestion_id.clone(),
        },
        DomainError::TimestampParseError { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoSubmittedRequests { .. } | CoreError::NoActiveProjects => ApiError::NoData {
            message: err.to_string(),
        },
        CoreError::OptimizationFailed(_) => ApiError::OptimizationFailed {
            message: err.to_string(),
        },
        CoreError::OracleContract(_) => ApiError::OracleContract {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Storage faults become `Internal`. Transition refusals raised inside a
/// write transaction keep their meaning.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::TransitionRejected(core_err) => translate_core_error(core_err),
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => {
            error!(error = %other, "Persistence error");
            ApiError::Internal {
                message: format!("Persistence error: {other}"),
            }
        }
    }
}
