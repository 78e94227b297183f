// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, BookingDraftRequest, Capability, ReviewBookingRequest, approve_booking,
    calendar_view, cancel_booking, check_conflicts, get_audit_timeline, get_booking,
    list_bookings, list_notifications, list_resources, list_slots, mark_notification_read,
    reject_booking, submit_booking,
};

use super::helpers::{
    create_other_requester, create_submit_request, create_test_admin, create_test_cause,
    create_test_context, create_test_requester, hall_draft_request, setup_test_persistence,
    submit_hall_booking,
};

fn reason(text: &str) -> ReviewBookingRequest {
    ReviewBookingRequest {
        reason: Some(String::from(text)),
    }
}

// ============================================================================
// Slots and catalog
// ============================================================================

#[test]
fn test_list_slots_returns_standard_day() {
    let context = create_test_context();
    let response = list_slots(&context);

    assert_eq!(response.slots.len(), 14);
    assert_eq!(response.slots[0].start, "09:00");
    assert_eq!(response.slots[0].end, "09:30");
    assert_eq!(response.slots[13].start, "16:30");
    assert_eq!(response.slots[13].end, "17:00");
    assert!(response.slots.iter().all(|s| s.start != "13:00" && s.start != "13:30"));
    assert_eq!(response.full_day_label, "Full Day (09:00 - 17:00)");
}

#[test]
fn test_list_resources_includes_catalog_and_departments() {
    let context = create_test_context();
    let response = list_resources(&context).unwrap();

    assert_eq!(response.resources.len(), 10);
    let hall = response
        .resources
        .iter()
        .find(|r| r.resource_key == "venue:ramanujan-hall")
        .expect("hall is in the catalog");
    assert_eq!(hall.name, "Ramanujan Hall");
    assert_eq!(hall.capacity, Some(100));

    let categories: Vec<&str> = response
        .department_categories
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(categories, vec!["Engineering", "Management", "Architecture"]);
}

// ============================================================================
// Conflict checks
// ============================================================================

#[test]
fn test_check_conflicts_on_empty_store_is_available() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();

    let response = check_conflicts(
        &mut persistence,
        &context,
        &hall_draft_request(&["10:00", "10:30"]),
        &create_test_requester(),
    )
    .unwrap();

    assert!(response.available);
    assert!(response.conflicts.is_empty());
    assert_eq!(response.resource_key, "venue:ramanujan-hall");
    assert_eq!(response.booking_date, "2025-03-10");
}

#[test]
fn test_check_conflicts_reports_overlapping_booking() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let requester = create_test_requester();
    let booking_id = submit_hall_booking(
        &mut persistence,
        &context,
        &requester,
        "Seminar",
        &["10:00", "10:30"],
    );

    let overlapping = check_conflicts(
        &mut persistence,
        &context,
        &hall_draft_request(&["10:30", "11:00"]),
        &create_other_requester(),
    )
    .unwrap();
    assert!(!overlapping.available);
    assert_eq!(overlapping.conflicts.len(), 1);
    assert_eq!(overlapping.conflicts[0].booking_id, Some(booking_id));
    assert_eq!(overlapping.conflicts[0].overlapping_slots, vec!["10:30"]);
    assert_eq!(overlapping.conflicts[0].status, "Pending");

    let adjacent = check_conflicts(
        &mut persistence,
        &context,
        &hall_draft_request(&["11:00", "11:30"]),
        &create_other_requester(),
    )
    .unwrap();
    assert!(adjacent.available);
}

#[test]
fn test_check_conflicts_rejects_empty_slot_set() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();

    let result = check_conflicts(
        &mut persistence,
        &context,
        &hall_draft_request(&[]),
        &create_test_requester(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "slots"
    ));
}

#[test]
fn test_check_conflicts_rejects_break_slot() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();

    let result = check_conflicts(
        &mut persistence,
        &context,
        &hall_draft_request(&["13:00"]),
        &create_test_requester(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_check_conflicts_unknown_resource_is_not_found() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let mut request = hall_draft_request(&["10:00"]);
    request.resource_id = Some(String::from("moon-base"));

    let result = check_conflicts(&mut persistence, &context, &request, &create_test_requester());

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_check_conflicts_full_day_collides_with_any_slot() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    submit_hall_booking(
        &mut persistence,
        &context,
        &create_test_requester(),
        "Talk",
        &["16:30"],
    );

    let request = BookingDraftRequest {
        duration_mode: Some(String::from("full-day")),
        ..hall_draft_request(&[])
    };
    let response =
        check_conflicts(&mut persistence, &context, &request, &create_other_requester()).unwrap();

    assert!(!response.available);
    assert_eq!(response.conflicts[0].overlapping_slots, vec!["16:30"]);
}

#[test]
fn test_unreadable_snapshot_fails_conflict_check_like_submission() {
    use diesel::{Connection, RunQueryDsl, SqliteConnection};

    let path = std::env::temp_dir().join(format!(
        "campus-book-unreadable-snapshot-{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let context = create_test_context();
    let mut persistence = campus_book_persistence::Persistence::new_with_file(&path).unwrap();
    submit_hall_booking(
        &mut persistence,
        &context,
        &create_test_requester(),
        "Seminar",
        &["10:00"],
    );

    let mut raw = SqliteConnection::establish(path.to_str().unwrap()).unwrap();
    diesel::sql_query("UPDATE bookings SET slots_json = 'not json'")
        .execute(&mut raw)
        .unwrap();

    let check_error = check_conflicts(
        &mut persistence,
        &context,
        &hall_draft_request(&["11:00"]),
        &create_other_requester(),
    )
    .err()
    .unwrap();
    let submit_error = submit_booking(
        &mut persistence,
        &context,
        &create_submit_request("Talk", hall_draft_request(&["11:00"])),
        &create_other_requester(),
        create_test_cause(),
    )
    .err()
    .unwrap();

    assert!(matches!(check_error, ApiError::Internal { .. }));
    assert_eq!(check_error, submit_error);

    drop(raw);
    drop(persistence);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

// ============================================================================
// Submission
// ============================================================================

#[test]
fn test_submit_booking_stores_pending_booking() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let requester = create_test_requester();

    let result = submit_booking(
        &mut persistence,
        &context,
        &create_submit_request("Seminar", hall_draft_request(&["10:00", "10:30"])),
        &requester,
        create_test_cause(),
    )
    .unwrap();

    let booking = &result.response.booking;
    assert_eq!(booking.status, "Pending");
    assert_eq!(booking.requester_id, requester.id);
    assert_eq!(booking.resource_name, "Ramanujan Hall");
    assert_eq!(booking.time_label, "10:00 - 11:00 (2 slots)");
    assert!(booking.created_at.is_some());
    assert_eq!(result.audit_event.action.name, "SubmitBooking");
    assert_eq!(result.audit_event.booking_id, booking.booking_id);
    assert!(result.audit_event.event_id.is_some());
    assert!(result.notification.is_none());
}

#[test]
fn test_submit_booking_blocks_conflict() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let first_id = submit_hall_booking(
        &mut persistence,
        &context,
        &create_test_requester(),
        "Seminar",
        &["10:00", "10:30"],
    );

    let result = submit_booking(
        &mut persistence,
        &context,
        &create_submit_request("Clash", hall_draft_request(&["10:30", "11:00"])),
        &create_other_requester(),
        create_test_cause(),
    );

    match result {
        Err(ApiError::BookingConflict { conflicts }) => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].booking_id, Some(first_id));
        }
        other => panic!("Expected BookingConflict, got {other:?}"),
    }
    assert_eq!(persistence.list_bookings().unwrap().len(), 1);
}

#[test]
fn test_submit_after_rejection_frees_slots() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let first_id = submit_hall_booking(
        &mut persistence,
        &context,
        &create_test_requester(),
        "Seminar",
        &["10:00", "10:30"],
    );
    reject_booking(
        &mut persistence,
        &context,
        first_id,
        reason("Hall under maintenance"),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();

    let second_id = submit_hall_booking(
        &mut persistence,
        &context,
        &create_other_requester(),
        "Workshop",
        &["10:30", "11:00"],
    );
    assert_ne!(first_id, second_id);
}

#[test]
fn test_submit_booking_rejects_overcapacity() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let mut request = create_submit_request("Fest", hall_draft_request(&["10:00"]));
    request.attendees = 250;

    let result = submit_booking(
        &mut persistence,
        &context,
        &request,
        &create_test_requester(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "resource_capacity"
    ));
}

#[test]
fn test_submit_booking_rejects_unknown_department() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let mut request = create_submit_request("Fest", hall_draft_request(&["10:00"]));
    request.department_category = String::from("Management");

    let result = submit_booking(
        &mut persistence,
        &context,
        &request,
        &create_test_requester(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "department"
    ));
}

#[test]
fn test_submit_booking_normalizes_timestamp_date() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let mut draft = hall_draft_request(&["10:00"]);
    // 20:00 UTC on the 9th is the 10th in Asia/Kolkata.
    draft.booking_date = String::from("2025-03-09T20:00:00Z");

    let result = submit_booking(
        &mut persistence,
        &context,
        &create_submit_request("Late", draft),
        &create_test_requester(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.response.booking.booking_date, "2025-03-10");
}

// ============================================================================
// Review
// ============================================================================

#[test]
fn test_approve_booking_notifies_requester() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let requester = create_test_requester();
    let booking_id =
        submit_hall_booking(&mut persistence, &context, &requester, "Seminar", &["10:00"]);

    let result = approve_booking(
        &mut persistence,
        &context,
        booking_id,
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.response.previous_status, "Pending");
    assert_eq!(result.response.booking.status, "Approved");
    assert_eq!(result.response.booking.reviewed_by.as_deref(), Some("admin-123"));
    assert!(result.response.notification_id.is_some());
    let notification = result.notification.expect("review sends a notification");
    assert_eq!(notification.recipient_id(), requester.id);

    let listed = list_notifications(&mut persistence, &requester, false).unwrap();
    assert_eq!(listed.notifications.len(), 1);
    assert_eq!(listed.unread_count, 1);
    assert_eq!(listed.notifications[0].kind, "success");
}

#[test]
fn test_reject_booking_requires_reason() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let booking_id = submit_hall_booking(
        &mut persistence,
        &context,
        &create_test_requester(),
        "Seminar",
        &["10:00"],
    );

    let result = reject_booking(
        &mut persistence,
        &context,
        booking_id,
        ReviewBookingRequest { reason: None },
        &create_test_admin(),
        create_test_cause(),
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "reason"
    ));

    let blank = reject_booking(
        &mut persistence,
        &context,
        booking_id,
        reason("   "),
        &create_test_admin(),
        create_test_cause(),
    );
    assert!(blank.is_err());
    assert_eq!(
        persistence.get_booking(booking_id).unwrap().status.as_str(),
        "Pending"
    );
}

#[test]
fn test_cancel_approved_booking() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let admin = create_test_admin();
    let booking_id = submit_hall_booking(
        &mut persistence,
        &context,
        &create_test_requester(),
        "Seminar",
        &["10:00"],
    );
    approve_booking(&mut persistence, &context, booking_id, &admin, create_test_cause()).unwrap();

    let result = cancel_booking(
        &mut persistence,
        &context,
        booking_id,
        reason("Event postponed"),
        &admin,
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.response.previous_status, "Approved");
    assert_eq!(result.response.booking.status, "Cancelled");
    assert_eq!(
        result.response.booking.status_reason.as_deref(),
        Some("Event postponed")
    );
}

#[test]
fn test_review_closed_booking_is_rule_violation() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let admin = create_test_admin();
    let booking_id = submit_hall_booking(
        &mut persistence,
        &context,
        &create_test_requester(),
        "Seminar",
        &["10:00"],
    );
    reject_booking(
        &mut persistence,
        &context,
        booking_id,
        reason("No"),
        &admin,
        create_test_cause(),
    )
    .unwrap();

    let result = approve_booking(&mut persistence, &context, booking_id, &admin, create_test_cause());

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "booking_lifecycle"
    ));
}

#[test]
fn test_review_missing_booking_is_not_found() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();

    let result = approve_booking(
        &mut persistence,
        &context,
        999,
        &create_test_admin(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

// ============================================================================
// Reads
// ============================================================================

#[test]
fn test_get_booking_includes_capabilities() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let requester = create_test_requester();
    let booking_id =
        submit_hall_booking(&mut persistence, &context, &requester, "Seminar", &["10:00"]);

    let as_admin = get_booking(&mut persistence, &context, booking_id, &create_test_admin()).unwrap();
    assert_eq!(as_admin.capabilities.can_approve, Capability::Allowed);
    assert_eq!(as_admin.capabilities.can_cancel, Capability::Allowed);

    let as_owner = get_booking(&mut persistence, &context, booking_id, &requester).unwrap();
    assert_eq!(as_owner.capabilities.can_approve, Capability::Denied);
    assert_eq!(as_owner.booking.event_title, "Seminar");
}

#[test]
fn test_list_bookings_scopes_requesters_to_their_own() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let requester = create_test_requester();
    let other = create_other_requester();
    submit_hall_booking(&mut persistence, &context, &requester, "Mine", &["10:00"]);
    submit_hall_booking(&mut persistence, &context, &other, "Theirs", &["11:00"]);

    let own = list_bookings(&mut persistence, &context, None, &requester).unwrap();
    assert_eq!(own.bookings.len(), 1);
    assert_eq!(own.bookings[0].event_title, "Mine");

    let all = list_bookings(&mut persistence, &context, None, &create_test_admin()).unwrap();
    assert_eq!(all.bookings.len(), 2);

    let filtered = list_bookings(
        &mut persistence,
        &context,
        Some(other.id.as_str()),
        &create_test_admin(),
    )
    .unwrap();
    assert_eq!(filtered.bookings.len(), 1);
    assert_eq!(filtered.bookings[0].event_title, "Theirs");
}

#[test]
fn test_calendar_view_applies_visibility_policy() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let requester = create_test_requester();
    let other = create_other_requester();
    let admin = create_test_admin();

    let approved_id = submit_hall_booking(&mut persistence, &context, &other, "Approved", &["09:00"]);
    approve_booking(&mut persistence, &context, approved_id, &admin, create_test_cause()).unwrap();
    submit_hall_booking(&mut persistence, &context, &other, "Pending other", &["10:00"]);
    submit_hall_booking(&mut persistence, &context, &requester, "Pending mine", &["11:00"]);

    let anonymous = calendar_view(&mut persistence, &context, "2025-03-10", None).unwrap();
    assert_eq!(anonymous.visibility, "approved-and-own");
    let titles: Vec<&str> = anonymous.entries.iter().map(|e| e.event_title.as_str()).collect();
    assert_eq!(titles, vec!["Approved"]);

    let mine = calendar_view(&mut persistence, &context, "2025-03-10", Some(&requester)).unwrap();
    let titles: Vec<&str> = mine.entries.iter().map(|e| e.event_title.as_str()).collect();
    assert_eq!(titles, vec!["Approved", "Pending mine"]);
    assert!(mine.entries[1].is_own);

    let everything = calendar_view(&mut persistence, &context, "2025-03-10", Some(&admin)).unwrap();
    assert_eq!(everything.entries.len(), 3);

    let other_day = calendar_view(&mut persistence, &context, "2025-03-11", Some(&admin)).unwrap();
    assert!(other_day.entries.is_empty());
}

#[test]
fn test_calendar_view_rejects_bad_date() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();

    let result = calendar_view(&mut persistence, &context, "10/03/2025", None);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "booking_date"
    ));
}

#[test]
fn test_audit_timeline_records_lifecycle() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let requester = create_test_requester();
    let admin = create_test_admin();
    let booking_id =
        submit_hall_booking(&mut persistence, &context, &requester, "Seminar", &["10:00"]);
    approve_booking(&mut persistence, &context, booking_id, &admin, create_test_cause()).unwrap();
    cancel_booking(
        &mut persistence,
        &context,
        booking_id,
        reason("Clash with exams"),
        &admin,
        create_test_cause(),
    )
    .unwrap();

    let timeline = get_audit_timeline(&mut persistence, booking_id, &requester).unwrap();
    let actions: Vec<&str> = timeline.events.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(
        actions,
        vec!["SubmitBooking", "ApproveBooking", "CancelBooking"]
    );
    assert_eq!(timeline.events[0].actor_id, requester.id);
    assert_eq!(timeline.events[1].actor_type, "admin");
}

#[test]
fn test_mark_notification_read() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let requester = create_test_requester();
    let booking_id =
        submit_hall_booking(&mut persistence, &context, &requester, "Seminar", &["10:00"]);
    let review = approve_booking(
        &mut persistence,
        &context,
        booking_id,
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();
    let notification_id = review.response.notification_id.unwrap();

    let foreign = mark_notification_read(&mut persistence, notification_id, &create_other_requester());
    assert!(matches!(foreign, Err(ApiError::ResourceNotFound { .. })));

    mark_notification_read(&mut persistence, notification_id, &requester).unwrap();
    let unread = list_notifications(&mut persistence, &requester, true).unwrap();
    assert!(unread.notifications.is_empty());
    assert_eq!(unread.unread_count, 0);
}

#[test]
fn test_capabilities_serialize_as_booleans() {
    let mut persistence = setup_test_persistence();
    let context = create_test_context();
    let booking_id = submit_hall_booking(
        &mut persistence,
        &context,
        &create_test_requester(),
        "Seminar",
        &["10:00"],
    );
    let response =
        get_booking(&mut persistence, &context, booking_id, &create_test_admin()).unwrap();

    let json = serde_json::to_value(&response.capabilities).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "can_approve": true, "can_reject": true, "can_cancel": true })
    );
}
