// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::notification::Notification;
use campus_book_audit::{AuditEvent, StateSnapshot};
use campus_book_domain::{Booking, BookingStatus};

/// A read-only snapshot of the booking corpus a command is applied against.
///
/// The snapshot must contain at least every booking for the resource a
/// submission targets, and the booking a review command targets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// Bookings known at the time the snapshot was taken.
    pub bookings: Vec<Booking>,
}

impl State {
    /// Creates an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bookings: Vec::new(),
        }
    }

    /// Creates a state from fetched bookings.
    #[must_use]
    pub const fn from_bookings(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }

    /// Finds a booking by ID.
    #[must_use]
    pub fn find(&self, booking_id: i64) -> Option<&Booking> {
        self.bookings
            .iter()
            .find(|b| b.booking_id == Some(booking_id))
    }

    /// Number of bookings still holding their slots.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.bookings.iter().filter(|b| b.is_active()).count()
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "bookings_count={};active_count={}",
            self.bookings.len(),
            self.active_count()
        ))
    }
}

/// The result of a successful booking transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. Nothing is stored until the caller persists the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The booking as it should be stored.
    pub booking: Booking,
    /// The status the booking was read with, for review transitions.
    ///
    /// Stores apply the update only while the stored status still equals it.
    pub previous_status: Option<BookingStatus>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// The message for the requester, for review transitions.
    pub notification: Option<Notification>,
}
