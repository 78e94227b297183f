// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::notification::Notification;
use crate::state::TransitionResult;
use campus_book_domain::{Booking, ResourceKey};

/// Durable storage for bookings.
///
/// All booking mutation goes through an implementation of this trait. The
/// core only ever reads snapshots from it.
pub trait BookingStore {
    /// The store's error type.
    type Error: std::error::Error;

    /// Every stored booking for a resource, in any status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn bookings_for_resource(&mut self, key: &ResourceKey) -> Result<Vec<Booking>, Self::Error>;

    /// Stores a transition: the booking, its audit event, and the
    /// requester's notification when the result carries one.
    ///
    /// A booking without an ID is created `Pending`. A booking with an ID has
    /// its status, reason and reviewer updated, but only while the stored
    /// status still equals [`TransitionResult::previous_status`].
    ///
    /// Returns the booking as stored, with its ID and timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist, its status moved on,
    /// or any write fails. Nothing is stored in that case.
    fn store_transition(&mut self, result: &TransitionResult) -> Result<Booking, Self::Error>;
}

/// Delivers status change messages to requesters.
///
/// Delivery is fire-and-forget: failures are the sender's concern.
pub trait NotificationSender {
    /// Sends one notification.
    fn notify(&self, notification: &Notification);
}

/// Persists a transition through the store.
///
/// The whole result is handed to the store, so the audit event and the
/// requester's notification are never split from the booking change.
///
/// # Errors
///
/// Returns the store's error if the write fails.
pub fn persist_transition<S: BookingStore>(
    store: &mut S,
    result: &TransitionResult,
) -> Result<Booking, S::Error> {
    store.store_transition(result)
}
