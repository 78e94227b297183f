// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_book::{Command, TransitionResult};
use campus_book_audit::AuditEvent;
use campus_book_domain::Booking;

use super::{apply_stored, create_test_admin, hall_draft, submit};
use crate::{Persistence, PersistTransitionResult, PersistenceError};

#[test]
fn test_submission_records_audit_event() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let stored: Booking = submit(&mut persistence, hall_draft(&["14:00"]), "Club meet");
    let booking_id: i64 = stored.booking_id.unwrap();

    let timeline: Vec<AuditEvent> = persistence.get_audit_timeline(booking_id).unwrap();
    assert_eq!(timeline.len(), 1);

    let event: &AuditEvent = &timeline[0];
    assert_eq!(event.booking_id, Some(booking_id));
    assert_eq!(event.action.name, "SubmitBooking");
    assert_eq!(event.actor.id, "student-1");
    assert_eq!(event.actor.actor_type, "requester");
    assert_eq!(event.cause.id, "test-cause");
    assert_eq!(event.before.data, "status=None");
    assert_eq!(event.after.field("status"), Some("Pending"));
    assert_eq!(event.after.field("slots"), Some("14:00"));
}

#[test]
fn test_timeline_is_ordered() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let stored: Booking = submit(&mut persistence, hall_draft(&["14:00"]), "Club meet");
    let booking_id: i64 = stored.booking_id.unwrap();

    let approve: TransitionResult = apply_stored(
        &mut persistence,
        Command::ApproveBooking { booking_id },
        create_test_admin(),
    );
    persistence.persist_transition(&approve).unwrap();

    let cancel: TransitionResult = apply_stored(
        &mut persistence,
        Command::CancelBooking {
            booking_id,
            reason: String::from("Speaker unavailable"),
        },
        create_test_admin(),
    );
    let persisted: PersistTransitionResult = persistence.persist_transition(&cancel).unwrap();

    let names: Vec<String> = persistence
        .get_audit_timeline(booking_id)
        .unwrap()
        .into_iter()
        .map(|e| e.action.name)
        .collect();
    assert_eq!(names, vec!["SubmitBooking", "ApproveBooking", "CancelBooking"]);

    let last: AuditEvent = persistence.get_audit_event(persisted.event_id).unwrap();
    assert_eq!(last.event_id, Some(persisted.event_id));
    assert_eq!(last.action.details.as_deref(), Some("Speaker unavailable"));
    assert_eq!(last.before.field("status"), Some("Approved"));
    assert_eq!(last.after.field("reason"), Some("Speaker unavailable"));
}

#[test]
fn test_missing_event_is_reported() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(
        persistence.get_audit_event(99),
        Err(PersistenceError::EventNotFound(99))
    );
    assert!(persistence.get_audit_timeline(99).unwrap().is_empty());
}
