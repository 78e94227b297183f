// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod conflict;

use crate::{
    Booking, BookingDetails, BookingDraft, BookingStatus, Requester, ResourceRef, Slot, SlotSet,
};
use time::Date;

pub fn slots(labels: &[&str]) -> SlotSet {
    labels.iter().map(|l| Slot::parse(l).unwrap()).collect()
}

pub fn details(title: &str, department: &str) -> BookingDetails {
    BookingDetails {
        event_title: String::from(title),
        event_description: String::from("Test event"),
        attendees: 40,
        department_category: String::from("Engineering"),
        department: String::from(department),
        faculty_incharge: Some(String::from("Dr. Rao")),
        contact_number: Some(String::from("9999999999")),
        contact_email: Some(String::from("events@campus.edu")),
    }
}

pub fn requester(id: &str) -> Requester {
    Requester {
        requester_id: String::from(id),
        name: format!("User {id}"),
        email: format!("{id}@campus.edu"),
    }
}

pub fn stored_booking(
    booking_id: i64,
    resource: ResourceRef,
    date: Date,
    labels: &[&str],
    status: BookingStatus,
) -> Booking {
    let mut booking: Booking = Booking::new(
        BookingDraft::custom(resource, date, slots(labels)),
        details(&format!("Event {booking_id}"), "cse"),
        requester("owner"),
        "Resource",
    )
    .unwrap()
    .with_id(booking_id);
    booking.status = status;
    booking
}
