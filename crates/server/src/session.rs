// Copyright (C) 2026 SIFUT Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity extraction for the server.
//!
//! Identity is asserted by the upstream identity collaborator through two
//! headers. This module only reads and validates them.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use sifut_api::{AuthError, AuthenticatedActor, AuthenticationService};
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Header carrying the caller's member identifier.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";
/// Header carrying the caller's role (`admin` or `member`).
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Extractor for the authenticated caller.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     CallerIdentity(actor): CallerIdentity,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 Unauthorized if:
/// - Either header is missing or not valid UTF-8
/// - The identifier is blank
/// - The role is not recognized
pub struct CallerIdentity(pub AuthenticatedActor);

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, SessionError> {
    headers
        .get(name)
        .map(|value| {
            value.to_str().map_err(|_| {
                warn!(header = name, "Identity header is not valid UTF-8");
                SessionError::InvalidHeaderEncoding(name.to_string())
            })
        })
        .transpose()
}

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor_id: Option<&str> = header_value(&parts.headers, ACTOR_ID_HEADER)?;
        let role: Option<&str> = header_value(&parts.headers, ACTOR_ROLE_HEADER)?;

        let actor: AuthenticatedActor =
            AuthenticationService::authenticate(actor_id, role).map_err(|e| {
                debug!(error = %e, "Caller identity rejected");
                SessionError::Rejected(e)
            })?;

        debug!(actor_id = %actor.id, role = %actor.role, "Caller identified");
        Ok(Self(actor))
    }
}

/// Identity extraction errors.
///
/// These are turned into 401 responses with the standard error body.
#[derive(Debug)]
pub enum SessionError {
    /// An identity header could not be read as text.
    InvalidHeaderEncoding(String),
    /// The identity claims were missing or invalid.
    Rejected(AuthError),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::InvalidHeaderEncoding(header) => {
                format!("Authentication failed: header '{header}' is not valid text")
            }
            Self::Rejected(err) => err.to_string(),
        };

        HttpError {
            status: StatusCode::UNAUTHORIZED,
            kind: "AuthenticationError",
            message,
        }
        .into_response()
    }
}
