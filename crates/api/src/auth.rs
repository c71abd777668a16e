// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity and role-based authorization.
//!
//! Identity is established upstream. This layer only parses what the
//! identity collaborator hands over and decides what the caller may do.

use std::str::FromStr;

use crate::error::AuthError;

/// Caller roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Administrators run optimizations, review suggestions and manage the
    /// staffing registry and the confirmed schedule.
    Admin,
    /// Members manage their own shift requests and read their own schedule.
    Member,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: '{s}'. Must be 'admin' or 'member'"),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated caller with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The caller's member identifier.
    pub id: String,
    pub role: Role,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Turns identity claims from the upstream collaborator into an actor.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Builds an actor from an identifier and role claim.
    ///
    /// # Errors
    ///
    /// Returns an error if either claim is missing or blank, or the role is
    /// not recognized.
    pub fn authenticate(
        actor_id: Option<&str>,
        role: Option<&str>,
    ) -> Result<AuthenticatedActor, AuthError> {
        let actor_id: &str = actor_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Missing caller identity"),
            })?;
        let role: Role = role
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Missing caller role"),
            })?
            .parse()?;

        Ok(AuthenticatedActor::new(actor_id.to_string(), role))
    }
}

/// Authorization service for enforcing role-based and ownership rules.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor is an administrator.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Member => Err(AuthError::AccessDenied {
                action: action.to_string(),
                reason: String::from("requires Admin role"),
            }),
        }
    }

    /// Checks that the actor owns the record.
    ///
    /// Administrators get no exemption here.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not the owner.
    pub fn authorize_owner(
        actor: &AuthenticatedActor,
        owner_id: &str,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.id == owner_id {
            Ok(())
        } else {
            Err(AuthError::AccessDenied {
                action: action.to_string(),
                reason: String::from("only the owner may do this"),
            })
        }
    }

    /// Checks that the actor owns the record or is an administrator.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither.
    pub fn authorize_owner_or_admin(
        actor: &AuthenticatedActor,
        owner_id: &str,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.is_admin() || actor.id == owner_id {
            Ok(())
        } else {
            Err(AuthError::AccessDenied {
                action: action.to_string(),
                reason: String::from("only the owner or an administrator may do this"),
            })
        }
    }
}
