// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{slots, stored_booking};
use crate::{
    Booking, BookingDraft, BookingStatus, ConflictReport, ResourceRef, Slot, SlotCalendar, SlotSet,
    find_conflicts,
};
use time::macros::date;

fn hall_draft(labels: &[&str]) -> BookingDraft {
    BookingDraft::custom(
        ResourceRef::venue("ramanujan-hall"),
        date!(2025 - 03 - 10),
        slots(labels),
    )
}

#[test]
fn test_empty_corpus_gives_empty_report() {
    let report: ConflictReport = find_conflicts(&hall_draft(&["10:00"]), &Vec::<Booking>::new());
    assert!(report.is_clear());
}

#[test]
fn test_scenario_overlapping_pending_booking_conflicts() {
    let existing: Vec<Booking> = vec![stored_booking(
        1,
        ResourceRef::venue("ramanujan-hall"),
        date!(2025 - 03 - 10),
        &["10:00", "10:30"],
        BookingStatus::Pending,
    )];

    let report: ConflictReport = find_conflicts(&hall_draft(&["10:30", "11:00"]), &existing);
    assert_eq!(report.len(), 1);
    let entry = &report.entries()[0];
    assert_eq!(entry.booking_id, Some(1));
    assert_eq!(entry.event_title, "Event 1");
    assert_eq!(entry.department, "cse");
    assert_eq!(entry.status, BookingStatus::Pending);
    assert_eq!(entry.overlapping_slots, vec![Slot::parse("10:30").unwrap()]);
}

#[test]
fn test_scenario_adjacent_booking_does_not_conflict() {
    let existing: Vec<Booking> = vec![stored_booking(
        1,
        ResourceRef::venue("ramanujan-hall"),
        date!(2025 - 03 - 10),
        &["10:00", "10:30"],
        BookingStatus::Pending,
    )];

    let report: ConflictReport = find_conflicts(&hall_draft(&["11:00", "11:30"]), &existing);
    assert!(report.is_clear());
}

#[test]
fn test_scenario_rejected_booking_is_ignored() {
    let existing: Vec<Booking> = vec![stored_booking(
        1,
        ResourceRef::venue("ramanujan-hall"),
        date!(2025 - 03 - 10),
        &["10:00", "10:30"],
        BookingStatus::Rejected,
    )];

    let report: ConflictReport = find_conflicts(&hall_draft(&["10:30", "11:00"]), &existing);
    assert!(report.is_clear());
}

#[test]
fn test_inactive_bookings_never_reported() {
    let all_day: Vec<&str> = vec![
        "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30", "14:00", "14:30",
        "15:00", "15:30", "16:00", "16:30",
    ];
    let existing: Vec<Booking> = vec![
        stored_booking(
            1,
            ResourceRef::venue("ramanujan-hall"),
            date!(2025 - 03 - 10),
            &all_day,
            BookingStatus::Rejected,
        ),
        stored_booking(
            2,
            ResourceRef::venue("ramanujan-hall"),
            date!(2025 - 03 - 10),
            &all_day,
            BookingStatus::Cancelled,
        ),
    ];
    let report: ConflictReport = find_conflicts(&hall_draft(&all_day), &existing);
    assert!(report.is_clear());
}

#[test]
fn test_approved_booking_conflicts() {
    let existing: Vec<Booking> = vec![stored_booking(
        9,
        ResourceRef::venue("ramanujan-hall"),
        date!(2025 - 03 - 10),
        &["14:00"],
        BookingStatus::Approved,
    )];
    let report: ConflictReport = find_conflicts(&hall_draft(&["14:00"]), &existing);
    assert_eq!(report.entries()[0].status, BookingStatus::Approved);
}

#[test]
fn test_other_resource_or_date_never_conflicts() {
    let existing: Vec<Booking> = vec![
        stored_booking(
            1,
            ResourceRef::venue("auditorium"),
            date!(2025 - 03 - 10),
            &["10:00"],
            BookingStatus::Approved,
        ),
        stored_booking(
            2,
            ResourceRef::venue("ramanujan-hall"),
            date!(2025 - 03 - 11),
            &["10:00"],
            BookingStatus::Approved,
        ),
        stored_booking(
            3,
            ResourceRef::bus("ramanujan-hall"),
            date!(2025 - 03 - 10),
            &["10:00"],
            BookingStatus::Pending,
        ),
    ];

    let calendar: SlotCalendar = SlotCalendar::standard();
    let full: BookingDraft = BookingDraft::full_day(
        ResourceRef::venue("ramanujan-hall"),
        date!(2025 - 03 - 10),
        &calendar,
    );
    assert!(find_conflicts(&full, &existing).is_clear());
}

#[test]
fn test_resource_key_match_ignores_case_and_whitespace() {
    let existing: Vec<Booking> = vec![stored_booking(
        1,
        ResourceRef::venue(" Ramanujan-Hall "),
        date!(2025 - 03 - 10),
        &["10:00"],
        BookingStatus::Pending,
    )];
    assert_eq!(find_conflicts(&hall_draft(&["10:00"]), &existing).len(), 1);
}

#[test]
fn test_turf_conflicts_are_per_sub_area() {
    let existing: Vec<Booking> = vec![stored_booking(
        1,
        ResourceRef::turf("football"),
        date!(2025 - 03 - 10),
        &["16:00"],
        BookingStatus::Approved,
    )];
    let football: BookingDraft =
        BookingDraft::custom(ResourceRef::turf("football"), date!(2025 - 03 - 10), slots(&["16:00"]));
    let badminton: BookingDraft =
        BookingDraft::custom(ResourceRef::turf("badminton"), date!(2025 - 03 - 10), slots(&["16:00"]));

    assert_eq!(find_conflicts(&football, &existing).len(), 1);
    assert!(find_conflicts(&badminton, &existing).is_clear());
}

#[test]
fn test_single_active_booking_reported_iff_slots_intersect() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let vocabulary: Vec<Slot> = calendar.full_day_slots().to_vec();

    // Every pair of contiguous two-slot windows on the same key and date.
    for a in vocabulary.windows(2) {
        for b in vocabulary.windows(2) {
            let existing_slots: SlotSet = a.iter().copied().collect();
            let candidate_slots: SlotSet = b.iter().copied().collect();
            let mut existing: Booking = stored_booking(
                1,
                ResourceRef::venue("ramanujan-hall"),
                date!(2025 - 03 - 10),
                &["09:00"],
                BookingStatus::Pending,
            );
            existing.draft.slots = existing_slots.clone();

            let candidate: BookingDraft = BookingDraft::custom(
                ResourceRef::venue("ramanujan-hall"),
                date!(2025 - 03 - 10),
                candidate_slots.clone(),
            );
            let report: ConflictReport = find_conflicts(&candidate, std::slice::from_ref(&existing));
            assert_eq!(
                report.len() == 1,
                existing_slots.intersects(&candidate_slots),
                "{a:?} vs {b:?}"
            );
        }
    }
}

#[test]
fn test_conflict_is_symmetric() {
    let a: Booking = stored_booking(
        1,
        ResourceRef::venue("auditorium"),
        date!(2025 - 03 - 10),
        &["09:00", "09:30", "10:00"],
        BookingStatus::Pending,
    );
    let b: Booking = stored_booking(
        2,
        ResourceRef::venue("auditorium"),
        date!(2025 - 03 - 10),
        &["10:00", "10:30"],
        BookingStatus::Pending,
    );
    let c: Booking = stored_booking(
        3,
        ResourceRef::venue("auditorium"),
        date!(2025 - 03 - 10),
        &["10:30", "11:00"],
        BookingStatus::Pending,
    );

    for (x, y) in [(&a, &b), (&a, &c), (&b, &c)] {
        let x_vs_y: bool = !find_conflicts(&x.draft, std::slice::from_ref(y)).is_clear();
        let y_vs_x: bool = !find_conflicts(&y.draft, std::slice::from_ref(x)).is_clear();
        assert_eq!(x_vs_y, y_vs_x);
    }
}

#[test]
fn test_report_preserves_corpus_order_and_sorts_for_display() {
    let existing: Vec<Booking> = vec![
        stored_booking(
            5,
            ResourceRef::venue("ramanujan-hall"),
            date!(2025 - 03 - 10),
            &["10:00"],
            BookingStatus::Pending,
        ),
        stored_booking(
            2,
            ResourceRef::venue("ramanujan-hall"),
            date!(2025 - 03 - 10),
            &["10:30"],
            BookingStatus::Approved,
        ),
    ];
    let report: ConflictReport = find_conflicts(&hall_draft(&["10:00", "10:30"]), &existing);
    let corpus_order: Vec<Option<i64>> = report.entries().iter().map(|e| e.booking_id).collect();
    assert_eq!(corpus_order, vec![Some(5), Some(2)]);

    let display: Vec<Option<i64>> = report
        .in_display_order()
        .iter()
        .map(|e| e.booking_id)
        .collect();
    assert_eq!(display, vec![Some(2), Some(5)]);
}

#[test]
fn test_full_day_candidate_conflicts_with_any_same_day_booking() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let existing: Vec<Booking> = vec![stored_booking(
        1,
        ResourceRef::venue("ramanujan-hall"),
        date!(2025 - 03 - 10),
        &["16:30"],
        BookingStatus::Pending,
    )];
    let full: BookingDraft = BookingDraft::full_day(
        ResourceRef::venue("ramanujan-hall"),
        date!(2025 - 03 - 10),
        &calendar,
    );
    assert_eq!(full.slots.len(), 14);
    assert!(!full.slots.contains(&Slot::parse("13:00").unwrap()));
    assert!(!full.slots.contains(&Slot::parse("13:30").unwrap()));
    assert_eq!(find_conflicts(&full, &existing).len(), 1);
}

#[test]
fn test_report_serializes_as_list() {
    let existing: Vec<Booking> = vec![stored_booking(
        4,
        ResourceRef::venue("ramanujan-hall"),
        date!(2025 - 03 - 10),
        &["10:00"],
        BookingStatus::Pending,
    )];
    let report: ConflictReport = find_conflicts(&hall_draft(&["10:00"]), &existing);
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json[0]["booking_id"], 4);
    assert_eq!(json[0]["status"], "Pending");
    assert_eq!(json[0]["overlapping_slots"][0], "10:00");
}
