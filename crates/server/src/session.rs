// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor extraction at the server boundary.
//!
//! Identity is supplied by the fronting campus gateway through request
//! headers. These extractors turn those headers into an
//! [`AuthenticatedActor`] and a [`Cause`] for the audit trail.

use std::str::FromStr;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use campus_book_api::{AuthenticatedActor, Role, authenticate_stub};
use campus_book_audit::Cause;
use tracing::{debug, warn};

use crate::AppState;

/// Header carrying the caller's user id.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";
/// Header carrying the caller's role (`admin` or `requester`).
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";
/// Header carrying an upstream request id, used as the audit cause id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const DEFAULT_CAUSE_ID: &str = "http-request";

/// Extractor for requests that must carry an identity.
///
/// Yields the authenticated actor and the audit cause for the request.
///
/// # Errors
///
/// Rejects with HTTP 401 when the id header is missing or blank, or the
/// role header is missing or names an unknown role.
pub struct RequestActor(pub AuthenticatedActor, pub Cause);

impl FromRequestParts<AppState> for RequestActor {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = actor_from_headers(&parts.headers)?;

        let cause_id = header_value(&parts.headers, REQUEST_ID_HEADER)?
            .unwrap_or_else(|| String::from(DEFAULT_CAUSE_ID));
        let cause = Cause::new(
            cause_id,
            format!("{} {}", parts.method, parts.uri.path()),
        );

        debug!(actor_id = %actor.id, role = actor.role.as_str(), "Actor extracted");

        Ok(Self(actor, cause))
    }
}

/// Extractor for endpoints that also serve anonymous callers.
///
/// Absent identity headers yield `None`; malformed ones still reject.
pub struct OptionalActor(pub Option<AuthenticatedActor>);

impl FromRequestParts<AppState> for OptionalActor {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(ACTOR_ID_HEADER) {
            return Ok(Self(None));
        }
        actor_from_headers(&parts.headers).map(|actor| Self(Some(actor)))
    }
}

fn actor_from_headers(headers: &HeaderMap) -> Result<AuthenticatedActor, SessionError> {
    let actor_id = header_value(headers, ACTOR_ID_HEADER)?.ok_or_else(|| {
        debug!("Missing actor id header");
        SessionError::MissingHeader(ACTOR_ID_HEADER)
    })?;

    let role_raw = header_value(headers, ACTOR_ROLE_HEADER)?.ok_or_else(|| {
        debug!("Missing actor role header");
        SessionError::MissingHeader(ACTOR_ROLE_HEADER)
    })?;

    let role = Role::from_str(&role_raw).map_err(|e| {
        warn!(role = %role_raw, "Unknown actor role");
        SessionError::InvalidIdentity(e.to_string())
    })?;

    authenticate_stub(actor_id, role).map_err(|e| {
        warn!(error = %e, "Actor authentication failed");
        SessionError::InvalidIdentity(e.to_string())
    })
}

fn header_value(headers: &HeaderMap, name: &'static str) -> Result<Option<String>, SessionError> {
    headers
        .get(name)
        .map(|value| {
            value.to_str().map(str::to_string).map_err(|_| {
                warn!(header = name, "Invalid header encoding");
                SessionError::InvalidHeader(name)
            })
        })
        .transpose()
}

/// Actor extraction errors.
///
/// Converted to HTTP 401 responses.
#[derive(Debug)]
pub enum SessionError {
    /// A required identity header is absent.
    MissingHeader(&'static str),
    /// A header is not valid visible ASCII.
    InvalidHeader(&'static str),
    /// The supplied identity was rejected.
    InvalidIdentity(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingHeader(name) => format!("Missing {name} header"),
            Self::InvalidHeader(name) => format!("Invalid {name} header encoding"),
            Self::InvalidIdentity(reason) => reason,
        };

        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}
