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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod booking;
mod catalog;
mod conflict;
mod date;
mod error;
mod resource;
mod slot;
mod validation;
mod visibility;

#[cfg(test)]
mod tests;

pub use booking::{Booking, BookingDetails, BookingDraft, BookingStatus, DurationMode, Requester};
pub use catalog::{CatalogResource, Department, DepartmentCategory, ResourceCatalog};
pub use conflict::{ConflictEntry, ConflictReport, find_conflicts, find_conflicts_for_key};
pub use date::{
    DEFAULT_TIMEZONE, campus_date, format_booking_date, parse_booking_date, parse_timezone,
    today_in,
};
pub use error::DomainError;
pub use resource::{ResourceKey, ResourceRef, ResourceType};
pub use slot::{
    BreakWindow, SLOT_MINUTES, Slot, SlotCalendar, SlotCalendarConfig, SlotSet,
    add_thirty_minutes, describe_slots, slot_range_label, toggle_slot,
};
pub use validation::{validate_booking_details, validate_requester, validate_submission};
pub use visibility::{CalendarViewer, CalendarVisibility};

// Re-exported so downstream crates name the same time zone type.
pub use chrono_tz::Tz;
