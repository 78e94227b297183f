// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use campus_book_audit::AuditEvent;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventFullRow {
    event_id: i64,
    booking_id: i64,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    #[allow(dead_code)]
    created_at: String,
}

impl AuditEventFullRow {
    fn into_event(self) -> Result<AuditEvent, PersistenceError> {
        let actor_data: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause_data: CauseData = serde_json::from_str(&self.cause_json)?;
        let action_data: ActionData = serde_json::from_str(&self.action_json)?;
        let before_data: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after_data: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        Ok(AuditEvent::new(
            Some(self.booking_id),
            actor_data.into(),
            cause_data.into(),
            action_data.into(),
            before_data.into(),
            after_data.into(),
        )
        .with_ids(self.event_id, self.booking_id))
    }
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let result = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventFullRow::as_select())
        .first::<AuditEventFullRow>(conn);

    let row: AuditEventFullRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::EventNotFound(event_id));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    row.into_event()
}

/// Retrieves every audit event for a booking, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventFullRow> = audit_events::table
        .filter(audit_events::booking_id.eq(booking_id))
        .order(audit_events::event_id.asc())
        .select(AuditEventFullRow::as_select())
        .load(conn)?;

    rows.into_iter().map(AuditEventFullRow::into_event).collect()
}
