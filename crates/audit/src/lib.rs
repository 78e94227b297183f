// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Audit trail for booking lifecycle changes.
//!
//! Every successful submission or status change produces exactly one
//! [`AuditEvent`] recording who acted, why, what they did, and the booking
//! state before and after.

use campus_book_domain::Booking;

/// The entity performing an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "admin", "requester", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// The reason or trigger for an action (e.g. an HTTP request id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause.
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Lifecycle operations that are audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingAction {
    /// A requester submitted a new booking.
    Submit,
    /// An administrator approved a booking.
    Approve,
    /// An administrator rejected a booking.
    Reject,
    /// An administrator cancelled a booking.
    Cancel,
}

impl BookingAction {
    /// The action name stored in the audit log.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "SubmitBooking",
            Self::Approve => "ApproveBooking",
            Self::Reject => "RejectBooking",
            Self::Cancel => "CancelBooking",
        }
    }
}

impl std::fmt::Display for BookingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`ApproveBooking`").
    pub name: String,
    /// Optional additional details, such as a cancellation reason.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }

    /// An action for a booking lifecycle operation.
    #[must_use]
    pub fn booking(action: BookingAction, details: Option<String>) -> Self {
        Self {
            name: action.as_str().to_string(),
            details,
        }
    }
}

/// A compact textual capture of booking state for the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// Semicolon-separated `key=value` pairs.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Snapshot used as the "before" state of a new booking.
    #[must_use]
    pub fn absent() -> Self {
        Self {
            data: String::from("status=None"),
        }
    }

    /// Captures the audited fields of a booking.
    ///
    /// Format: `status=..;resource=..;date=..;slots=a,b`, followed by
    /// `;reason=..` when a status reason is present.
    #[must_use]
    pub fn of_booking(booking: &Booking) -> Self {
        let mut data: String = format!(
            "status={};resource={};date={};slots={}",
            booking.status,
            booking.resource_key,
            booking.booking_date(),
            booking.slots().labels().join(",")
        );
        if let Some(reason) = &booking.status_reason {
            data.push_str(";reason=");
            data.push_str(reason);
        }
        Self { data }
    }

    /// Looks up one `key=value` field in the snapshot.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.data
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .find_map(|(k, v)| (k == key).then_some(v))
    }
}

/// An immutable audit event representing a booking state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The event's canonical identifier. `None` until persisted.
    pub event_id: Option<i64>,
    /// The booking this event concerns. `None` for a submission that has
    /// not been persisted yet.
    pub booking_id: Option<i64>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent` for a booking.
    #[must_use]
    pub const fn new(
        booking_id: Option<i64>,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            booking_id,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Returns this event with persisted identifiers filled in.
    #[must_use]
    pub const fn with_ids(mut self, event_id: i64, booking_id: i64) -> Self {
        self.event_id = Some(event_id);
        self.booking_id = Some(booking_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_book_domain::{
        BookingDetails, BookingDraft, BookingStatus, Requester, ResourceRef, Slot, SlotSet,
    };
    use time::macros::date;

    fn booking() -> Booking {
        let slots: SlotSet = ["10:30", "10:00"]
            .iter()
            .map(|s| Slot::parse(s).unwrap())
            .collect();
        Booking::new(
            BookingDraft::custom(ResourceRef::venue("auditorium"), date!(2025 - 03 - 10), slots),
            BookingDetails::default(),
            Requester::default(),
            "Auditorium",
        )
        .unwrap()
    }

    #[test]
    fn test_booking_action_names() {
        assert_eq!(BookingAction::Submit.as_str(), "SubmitBooking");
        assert_eq!(
            Action::booking(BookingAction::Cancel, Some(String::from("rain"))),
            Action::new(String::from("CancelBooking"), Some(String::from("rain")))
        );
    }

    #[test]
    fn test_snapshot_of_booking() {
        let snapshot: StateSnapshot = StateSnapshot::of_booking(&booking());
        assert_eq!(
            snapshot.data,
            "status=Pending;resource=venue:auditorium;date=2025-03-10;slots=10:00,10:30"
        );
        assert_eq!(snapshot.field("status"), Some("Pending"));
        assert_eq!(snapshot.field("reason"), None);
    }

    #[test]
    fn test_snapshot_includes_reason() {
        let cancelled: Booking = booking()
            .transition(BookingStatus::Cancelled, Some("rain"), "admin")
            .unwrap();
        let snapshot: StateSnapshot = StateSnapshot::of_booking(&cancelled);
        assert_eq!(snapshot.field("status"), Some("Cancelled"));
        assert_eq!(snapshot.field("reason"), Some("rain"));
    }

    #[test]
    fn test_audit_event_ids() {
        let event: AuditEvent = AuditEvent::new(
            None,
            Actor::new(String::from("u1"), String::from("requester")),
            Cause::new(String::from("req-1"), String::from("HTTP request")),
            Action::booking(BookingAction::Submit, None),
            StateSnapshot::absent(),
            StateSnapshot::of_booking(&booking()),
        );
        assert_eq!(event.event_id, None);

        let stored: AuditEvent = event.clone().with_ids(3, 12);
        assert_eq!(stored.event_id, Some(3));
        assert_eq!(stored.booking_id, Some(12));
        assert_eq!(stored.actor, event.actor);
    }
}
