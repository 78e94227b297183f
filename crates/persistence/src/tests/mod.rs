// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod audit_timeline_tests;
mod initialization_tests;

use campus_book::{Command, State, TransitionResult, apply};
use campus_book_audit::{Actor, Cause};
use campus_book_domain::{
    Booking, BookingDetails, BookingDraft, Requester, ResourceCatalog, ResourceRef, Slot,
    SlotCalendar, SlotSet,
};
use time::macros::date;

use crate::Persistence;

pub fn create_test_admin() -> Actor {
    Actor::new(String::from("admin-1"), String::from("admin"))
}

pub fn create_test_requester_actor() -> Actor {
    Actor::new(String::from("student-1"), String::from("requester"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn slots(labels: &[&str]) -> SlotSet {
    labels.iter().map(|l| Slot::parse(l).unwrap()).collect()
}

pub fn create_test_details(title: &str) -> BookingDetails {
    BookingDetails {
        event_title: String::from(title),
        event_description: String::from("Department seminar"),
        attendees: 80,
        department_category: String::from("Engineering"),
        department: String::from("cse"),
        faculty_incharge: Some(String::from("Dr. Rao")),
        contact_number: Some(String::from("9876543210")),
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

pub fn hall_draft(labels: &[&str]) -> BookingDraft {
    BookingDraft::custom(
        ResourceRef::venue("ramanujan-hall"),
        date!(2025 - 03 - 10),
        slots(labels),
    )
}

/// Runs a command against everything currently stored.
pub fn apply_stored(
    persistence: &mut Persistence,
    command: Command,
    actor: Actor,
) -> TransitionResult {
    let state: State = State::from_bookings(persistence.list_bookings().unwrap());
    apply(
        &state,
        command,
        actor,
        create_test_cause(),
        &SlotCalendar::standard(),
        &ResourceCatalog::campus_default(),
    )
    .unwrap()
}

/// Submits and persists a booking, returning it as stored.
pub fn submit(persistence: &mut Persistence, draft: BookingDraft, title: &str) -> Booking {
    let result: TransitionResult = apply_stored(
        persistence,
        Command::SubmitBooking {
            draft,
            details: create_test_details(title),
            requester: create_test_requester(),
        },
        create_test_requester_actor(),
    );
    persistence.persist_transition(&result).unwrap().booking
}
