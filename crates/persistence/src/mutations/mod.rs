// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `bookings` — booking inserts and status updates
//! - `audit` — audit event persistence
//! - `notifications` — in-app notification rows
//!
//! The functions in this module combine them. Each runs inside one
//! transaction so a booking change is never stored without its audit event.

pub mod audit;
pub mod bookings;
pub mod notifications;

use campus_book::TransitionResult;
use campus_book_audit::AuditEvent;
use campus_book_domain::{Booking, BookingStatus};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::now_timestamp;
use crate::error::PersistenceError;

pub use notifications::mark_notification_read;

/// What a persisted transition was assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// The booking as stored, with its ID and timestamps.
    pub booking: Booking,
    /// The audit event's ID.
    pub event_id: i64,
    /// The in-app notification's ID, for review transitions.
    pub notification_id: Option<i64>,
}

/// Persists a transition result: the booking, its audit event, and the
/// requester's notification if there is one.
///
/// A status update only applies while the stored status still equals the
/// result's `previous_status`.
///
/// # Errors
///
/// Returns an error if any write fails, the stored status moved on, or an
/// update carries no previous status. Nothing is stored in that case.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    conn.transaction(|conn| {
        let (booking, event_id): (Booking, i64) = if result.booking.booking_id.is_some() {
            update_in_transaction(conn, result)?
        } else {
            create_in_transaction(conn, &result.booking, &result.audit_event)?
        };

        let notification_id: Option<i64> = match (&result.notification, booking.booking_id) {
            (Some(notification), Some(booking_id)) => {
                let (_, created_at): (OffsetDateTime, String) = now_timestamp()?;
                Some(notifications::insert_notification(
                    conn,
                    notification,
                    booking_id,
                    &created_at,
                )?)
            }
            _ => None,
        };

        info!(
            booking_id = booking.booking_id,
            event_id,
            status = %booking.status,
            "Persisted transition"
        );

        Ok(PersistTransitionResult {
            booking,
            event_id,
            notification_id,
        })
    })
}

fn create_in_transaction(
    conn: &mut SqliteConnection,
    booking: &Booking,
    event: &AuditEvent,
) -> Result<(Booking, i64), PersistenceError> {
    let (now, created_at): (OffsetDateTime, String) = now_timestamp()?;
    let booking_id: i64 = bookings::insert_booking(conn, booking, &created_at)?;
    let event_id: i64 = audit::persist_audit_event(conn, event, booking_id, &created_at)?;

    let mut stored: Booking = booking.clone().with_id(booking_id);
    stored.created_at = Some(now);
    Ok((stored, event_id))
}

fn update_in_transaction(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<(Booking, i64), PersistenceError> {
    let booking: &Booking = &result.booking;
    let booking_id: i64 = booking
        .booking_id
        .ok_or_else(|| PersistenceError::NotFound(String::from("Booking has no ID")))?;
    let expected: BookingStatus = result
        .previous_status
        .ok_or(PersistenceError::MissingPreviousStatus { booking_id })?;

    let (now, reviewed_at): (OffsetDateTime, String) = now_timestamp()?;
    bookings::update_booking_status(conn, booking, expected, &reviewed_at)?;
    let event_id: i64 =
        audit::persist_audit_event(conn, &result.audit_event, booking_id, &reviewed_at)?;

    let mut stored: Booking = booking.clone();
    stored.reviewed_at = Some(now);
    Ok((stored, event_id))
}
