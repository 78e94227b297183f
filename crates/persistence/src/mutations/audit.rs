// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use campus_book_audit::AuditEvent;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event against a stored booking.
///
/// The event's own `booking_id` is ignored in favour of `booking_id`, since a
/// submission's event is built before the booking has an ID.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The audit event to persist
/// * `booking_id` - The booking the event belongs to
/// * `created_at` - Timestamp to record
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
    booking_id: i64,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&ActorData::from(&event.actor))?;
    let cause_json: String = serde_json::to_string(&CauseData::from(&event.cause))?;
    let action_json: String = serde_json::to_string(&ActionData::from(&event.action))?;
    let before_json: String = serde_json::to_string(&StateSnapshotData::from(&event.before))?;
    let after_json: String = serde_json::to_string(&StateSnapshotData::from(&event.after))?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::booking_id.eq(booking_id),
            audit_events::actor_json.eq(actor_json),
            audit_events::cause_json.eq(cause_json),
            audit_events::action_json.eq(action_json),
            audit_events::before_snapshot_json.eq(before_json),
            audit_events::after_snapshot_json.eq(after_json),
            audit_events::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let event_id: i64 = conn.get_last_insert_rowid()?;
    debug!(event_id, booking_id, action = %event.action.name, "Persisted audit event");

    Ok(event_id)
}
