// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookingStore, Command, Notification, State, TransitionResult, apply};
use campus_book_audit::{Actor, Cause};
use campus_book_domain::{
    Booking, BookingDetails, BookingDraft, Requester, ResourceCatalog, ResourceKey, ResourceRef,
    Slot, SlotCalendar, SlotSet,
};
use time::macros::date;

pub fn create_test_admin() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_requester_actor() -> Actor {
    Actor::new(String::from("student-1"), String::from("requester"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Test request"))
}

pub fn slots(labels: &[&str]) -> SlotSet {
    labels.iter().map(|l| Slot::parse(l).unwrap()).collect()
}

pub fn hall_draft(labels: &[&str]) -> BookingDraft {
    BookingDraft::custom(
        ResourceRef::venue("ramanujan-hall"),
        date!(2025 - 03 - 10),
        slots(labels),
    )
}

pub fn create_test_details(title: &str) -> BookingDetails {
    BookingDetails {
        event_title: String::from(title),
        event_description: String::from("Guest lecture"),
        attendees: 60,
        department_category: String::from("Engineering"),
        department: String::from("cse"),
        faculty_incharge: Some(String::from("Dr. Rao")),
        contact_number: None,
        contact_email: None,
    }
}

pub fn create_test_requester() -> Requester {
    Requester {
        requester_id: String::from("student-1"),
        name: String::from("Asha"),
        email: String::from("asha@campus.edu"),
    }
}

/// Applies a submission and assigns the given ID, as a store would.
pub fn submit_stored(state: &State, labels: &[&str], booking_id: i64) -> Booking {
    let result: TransitionResult = apply(
        state,
        Command::SubmitBooking {
            draft: hall_draft(labels),
            details: create_test_details(&format!("Event {booking_id}")),
            requester: create_test_requester(),
        },
        create_test_requester_actor(),
        create_test_cause(),
        &SlotCalendar::standard(),
        &ResourceCatalog::campus_default(),
    )
    .unwrap();
    result.booking.with_id(booking_id)
}

#[derive(Debug)]
pub struct FetchFailed;

impl std::fmt::Display for FetchFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store offline")
    }
}

impl std::error::Error for FetchFailed {}

/// A store backed by a vector, with a switch to simulate outages.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub bookings: Vec<Booking>,
    pub offline: bool,
    pub fetches: usize,
    pub notifications: Vec<Notification>,
}

impl BookingStore for MemoryStore {
    type Error = FetchFailed;

    fn bookings_for_resource(&mut self, key: &ResourceKey) -> Result<Vec<Booking>, FetchFailed> {
        self.fetches += 1;
        if self.offline {
            return Err(FetchFailed);
        }
        Ok(self
            .bookings
            .iter()
            .filter(|b| &b.resource_key == key)
            .cloned()
            .collect())
    }

    fn store_transition(&mut self, result: &TransitionResult) -> Result<Booking, FetchFailed> {
        if self.offline {
            return Err(FetchFailed);
        }
        let stored: Booking = match result.booking.booking_id {
            None => {
                let id: i64 = i64::try_from(self.bookings.len()).unwrap() + 1;
                let stored: Booking = result.booking.clone().with_id(id);
                self.bookings.push(stored.clone());
                stored
            }
            Some(id) => {
                let slot: &mut Booking = self
                    .bookings
                    .iter_mut()
                    .find(|b| b.booking_id == Some(id))
                    .ok_or(FetchFailed)?;
                if Some(slot.status) != result.previous_status {
                    return Err(FetchFailed);
                }
                *slot = result.booking.clone();
                result.booking.clone()
            }
        };
        self.notifications.extend(result.notification.iter().cloned());
        Ok(stored)
    }
}
