// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking state transitions for campus resources.
//!
//! The core applies commands (submit, approve, reject, cancel) to a snapshot
//! of stored bookings and returns the booking to store, its audit event, and
//! the requester's notification. Nothing is written until a `BookingStore`
//! persists the result.
//!
//! - Submissions are validated against the slot calendar and resource
//!   catalog, then checked for slot conflicts with active bookings of the
//!   same resource and date.
//! - Reviews follow the booking lifecycle. Rejecting or cancelling needs a
//!   reason.
//! - `DraftEditor` tracks an in-progress booking form and re-runs the
//!   conflict check whenever a field changes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod draft;
mod error;
mod notification;
mod state;
mod store;

#[cfg(test)]
mod tests;

use campus_book_domain::{
    BookingDraft, ConflictReport, DomainError, ResourceKey, SlotCalendar, find_conflicts_for_key,
};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use draft::{Determination, DraftEditor, DraftField};
pub use error::CoreError;
pub use notification::{Notification, NotificationKind};
pub use state::{State, TransitionResult};
pub use store::{BookingStore, NotificationSender, persist_transition};

/// Runs a read-only conflict check for a draft against a snapshot.
///
/// The draft is validated first; an empty or out-of-vocabulary slot set is
/// rejected before the resolver runs. No audit event is created.
///
/// # Errors
///
/// Returns an error if the draft violates a structural invariant.
pub fn check_draft(
    calendar: &SlotCalendar,
    draft: &BookingDraft,
    state: &State,
) -> Result<ConflictReport, DomainError> {
    let key: ResourceKey = draft.validate(calendar)?;
    Ok(find_conflicts_for_key(&key, draft, &state.bookings))
}
