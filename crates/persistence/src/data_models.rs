// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_book_audit::{Action, Actor, Cause, StateSnapshot};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            actor_type: actor.actor_type.clone(),
        }
    }
}

impl From<ActorData> for Actor {
    fn from(data: ActorData) -> Self {
        Self::new(data.id, data.actor_type)
    }
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

impl From<CauseData> for Cause {
    fn from(data: CauseData) -> Self {
        Self::new(data.id, data.description)
    }
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

impl From<ActionData> for Action {
    fn from(data: ActionData) -> Self {
        Self::new(data.name, data.details)
    }
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

impl From<&StateSnapshot> for StateSnapshotData {
    fn from(snapshot: &StateSnapshot) -> Self {
        Self {
            data: snapshot.data.clone(),
        }
    }
}

impl From<StateSnapshotData> for StateSnapshot {
    fn from(data: StateSnapshotData) -> Self {
        Self::new(data.data)
    }
}

/// An in-app notification as stored for a requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationData {
    pub notification_id: i64,
    pub user_id: String,
    pub booking_id: Option<i64>,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: String,
}

/// Formats a timestamp the way every `*_at` column stores it.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    at.format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a stored `*_at` column.
///
/// # Errors
///
/// Returns an error if the column is not an RFC 3339 timestamp.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid timestamp '{value}': {e}"))
    })
}

/// The current time in the stored timestamp format.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn now_timestamp() -> Result<(OffsetDateTime, String), PersistenceError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    Ok((now, format_timestamp(now)?))
}
