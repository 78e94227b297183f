// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `bookings` — booking lookups by id, resource, requester, and date, and
//!   free-text booking search
//! - `audit` — audit events and per-booking timelines
//! - `notifications` — a user's in-app notifications

pub mod audit;
pub mod bookings;
pub mod notifications;

pub use audit::{get_audit_event, get_audit_timeline};
pub use bookings::{
    booking_exists, get_booking, list_bookings, list_bookings_for_date,
    list_bookings_for_requester, list_bookings_for_resource, search_bookings,
};
pub use notifications::list_notifications;
