// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use campus_book_audit::Cause;
use campus_book_domain::{
    CalendarVisibility, DEFAULT_TIMEZONE, ResourceCatalog, SlotCalendar, parse_timezone,
};
use campus_book_persistence::Persistence;

use crate::{
    AuthenticatedActor, BookingContext, BookingDraftRequest, Role, SubmitBookingRequest,
    SubmitBookingResponse, submit_booking,
};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-123"), Role::Admin)
}

pub fn create_test_requester() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("student-456"), Role::Requester)
}

pub fn create_other_requester() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("student-789"), Role::Requester)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_test_context() -> BookingContext {
    BookingContext::new(
        SlotCalendar::standard(),
        ResourceCatalog::campus_default(),
        parse_timezone(DEFAULT_TIMEZONE).unwrap(),
        CalendarVisibility::ApprovedAndOwn,
    )
}

pub fn setup_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn hall_draft_request(slots: &[&str]) -> BookingDraftRequest {
    BookingDraftRequest {
        resource_type: String::from("venue"),
        resource_id: Some(String::from("ramanujan-hall")),
        sub_area: None,
        booking_date: String::from("2025-03-10"),
        slots: slots.iter().map(|s| (*s).to_string()).collect(),
        duration_mode: None,
    }
}

pub fn create_submit_request(title: &str, draft: BookingDraftRequest) -> SubmitBookingRequest {
    SubmitBookingRequest {
        draft,
        event_title: String::from(title),
        event_description: String::from("Department seminar"),
        attendees: 60,
        department_category: String::from("Engineering"),
        department: String::from("CSE"),
        faculty_incharge: Some(String::from("Dr. Rao")),
        contact_number: Some(String::from("9876543210")),
        contact_email: None,
        requester_name: String::from("Asha"),
        requester_email: String::from("asha@campus.edu"),
    }
}

/// Submits a hall booking as `actor` and returns its ID.
pub fn submit_hall_booking(
    persistence: &mut Persistence,
    context: &BookingContext,
    actor: &AuthenticatedActor,
    title: &str,
    slots: &[&str],
) -> i64 {
    let result = submit_booking(
        persistence,
        context,
        &create_submit_request(title, hall_draft_request(slots)),
        actor,
        create_test_cause(),
    )
    .expect("Submission should succeed");
    let response: SubmitBookingResponse = result.response;
    response.booking.booking_id.expect("Stored booking has an ID")
}
