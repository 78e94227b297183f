// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose which review actions a caller may take on a booking
//! without leaking domain internals. They are advisory only and do not
//! replace backend authorization checks.

use campus_book_domain::{Booking, BookingStatus};

use crate::auth::{AuthenticatedActor, Role};
use crate::request_response::{BookingCapabilities, Capability};

/// Computes what an actor may do with one booking.
///
/// Capabilities depend on:
/// - the actor's role (only admins review)
/// - the booking's lifecycle state (closed bookings accept nothing)
#[must_use]
pub fn compute_booking_capabilities(
    actor: &AuthenticatedActor,
    booking: &Booking,
) -> BookingCapabilities {
    match actor.role {
        Role::Admin => {
            let pending: bool = booking.status == BookingStatus::Pending;
            BookingCapabilities {
                can_approve: Capability::from_bool(pending),
                can_reject: Capability::from_bool(pending),
                can_cancel: Capability::from_bool(booking.status.is_active()),
            }
        }
        Role::Requester => BookingCapabilities {
            can_approve: Capability::Denied,
            can_reject: Capability::Denied,
            can_cancel: Capability::Denied,
        },
    }
}
