// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_cause, create_test_details, create_test_requester, create_test_requester_actor,
    hall_draft, submit_stored,
};
use crate::{Command, CoreError, State, TransitionResult, apply, check_draft};
use campus_book_domain::{
    BookingDraft, BookingStatus, DomainError, ResourceCatalog, ResourceRef, SlotCalendar, SlotSet,
};
use time::macros::date;

fn submit(state: &State, draft: BookingDraft) -> Result<TransitionResult, CoreError> {
    apply(
        state,
        Command::SubmitBooking {
            draft,
            details: create_test_details("Guest Lecture"),
            requester: create_test_requester(),
        },
        create_test_requester_actor(),
        create_test_cause(),
        &SlotCalendar::standard(),
        &ResourceCatalog::campus_default(),
    )
}

#[test]
fn test_submit_creates_pending_booking() {
    let result: TransitionResult = submit(&State::new(), hall_draft(&["10:00", "10:30"])).unwrap();

    assert_eq!(result.booking.status, BookingStatus::Pending);
    assert_eq!(result.booking.booking_id, None);
    assert_eq!(result.booking.resource_name, "Ramanujan Hall");
    assert_eq!(result.booking.resource_key.as_str(), "venue:ramanujan-hall");
    assert!(result.notification.is_none());
}

#[test]
fn test_submit_emits_audit_event() {
    let result: TransitionResult = submit(&State::new(), hall_draft(&["10:00", "10:30"])).unwrap();

    assert_eq!(result.audit_event.action.name, "SubmitBooking");
    assert_eq!(
        result.audit_event.action.details.as_deref(),
        Some("Requested Ramanujan Hall on 2025-03-10 (10:00 - 11:00 (2 slots))")
    );
    assert_eq!(result.audit_event.before.data, "status=None");
    assert_eq!(result.audit_event.after.field("status"), Some("Pending"));
    assert_eq!(result.audit_event.actor.id, "student-1");
    assert_eq!(result.audit_event.booking_id, None);
}

#[test]
fn test_submit_blocked_by_overlapping_booking() {
    let existing = submit_stored(&State::new(), &["10:00", "10:30"], 1);
    let state: State = State::from_bookings(vec![existing]);

    let result = submit(&state, hall_draft(&["10:30", "11:00"]));
    match result {
        Err(CoreError::ConflictDetected(report)) => {
            assert_eq!(report.len(), 1);
            assert_eq!(report.entries()[0].booking_id, Some(1));
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn test_submit_adjacent_booking_allowed() {
    let existing = submit_stored(&State::new(), &["10:00", "10:30"], 1);
    let state: State = State::from_bookings(vec![existing]);

    assert!(submit(&state, hall_draft(&["11:00", "11:30"])).is_ok());
}

#[test]
fn test_submit_ignores_cancelled_booking() {
    let mut existing = submit_stored(&State::new(), &["10:00", "10:30"], 1);
    existing.status = BookingStatus::Cancelled;
    let state: State = State::from_bookings(vec![existing]);

    assert!(submit(&state, hall_draft(&["10:00", "10:30"])).is_ok());
}

#[test]
fn test_submit_empty_slots_is_invalid_input() {
    let draft: BookingDraft = BookingDraft::custom(
        ResourceRef::venue("ramanujan-hall"),
        date!(2025 - 03 - 10),
        SlotSet::new(),
    );
    let result = submit(&State::new(), draft);
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::EmptySlotSet))
    );
}

#[test]
fn test_submit_unknown_resource_rejected() {
    let draft: BookingDraft = BookingDraft::custom(
        ResourceRef::bus("bus-9"),
        date!(2025 - 03 - 10),
        hall_draft(&["09:00"]).slots,
    );
    let result = submit(&State::new(), draft);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::UnknownResource(_)))
    ));
}

#[test]
fn test_full_day_submission() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let draft: BookingDraft = BookingDraft::full_day(
        ResourceRef::venue("auditorium"),
        date!(2025 - 03 - 10),
        &calendar,
    );
    let result: TransitionResult = submit(&State::new(), draft).unwrap();
    assert_eq!(result.booking.slots().len(), 14);
    assert!(
        result
            .audit_event
            .action
            .details
            .unwrap()
            .ends_with("(Full Day (09:00 - 17:00))")
    );
}

#[test]
fn test_check_draft_reports_without_side_effects() {
    let existing = submit_stored(&State::new(), &["10:00", "10:30"], 1);
    let state: State = State::from_bookings(vec![existing]);
    let calendar: SlotCalendar = SlotCalendar::standard();

    let report = check_draft(&calendar, &hall_draft(&["10:30", "11:00"]), &state).unwrap();
    assert_eq!(report.len(), 1);

    let clear = check_draft(&calendar, &hall_draft(&["11:00", "11:30"]), &state).unwrap();
    assert!(clear.is_clear());
}

#[test]
fn test_check_draft_rejects_break_slot() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let mut draft: BookingDraft = hall_draft(&["12:30"]);
    draft
        .slots
        .insert(campus_book_domain::Slot::parse("13:00").unwrap());
    let err: DomainError = check_draft(&calendar, &draft, &State::new()).unwrap_err();
    assert!(err.is_invalid_input());
}
