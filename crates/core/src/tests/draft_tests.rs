// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{MemoryStore, submit_stored};
use crate::{CoreError, Determination, DraftEditor, DraftField, State};
use campus_book_domain::{ResourceRef, Slot, SlotCalendar};
use time::macros::date;

fn slot(label: &str) -> Slot {
    Slot::parse(label).unwrap()
}

fn store_with_pending_hall_booking() -> MemoryStore {
    MemoryStore {
        bookings: vec![submit_stored(&State::new(), &["10:00", "10:30"], 1)],
        ..MemoryStore::default()
    }
}

fn hall_editor(calendar: &SlotCalendar, labels: &[&str]) -> DraftEditor {
    let mut editor: DraftEditor = DraftEditor::new();
    editor.set_resource(ResourceRef::venue("ramanujan-hall"));
    editor.set_date(date!(2025 - 03 - 10));
    for label in labels {
        editor.toggle_slot(calendar, slot(label)).unwrap();
    }
    editor
}

#[test]
fn test_new_editor_is_unchecked_and_incomplete() {
    let editor: DraftEditor = DraftEditor::new();
    assert_eq!(editor.determination(), &Determination::Unchecked);
    assert!(editor.draft().is_none());
    assert!(!editor.needs_check());
    assert!(!editor.can_submit());
}

#[test]
fn test_changes_are_tracked_until_checked() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let mut editor: DraftEditor = hall_editor(&calendar, &["11:00"]);
    assert_eq!(
        editor.changed_fields(),
        vec![DraftField::Resource, DraftField::Date, DraftField::Slots]
    );
    assert!(editor.needs_check());

    let mut store: MemoryStore = store_with_pending_hall_booking();
    editor.revalidate_with(&calendar, &mut store).unwrap();
    assert!(editor.changed_fields().is_empty());
    assert!(!editor.needs_check());
}

#[test]
fn test_clear_check_allows_submission() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let mut editor: DraftEditor = hall_editor(&calendar, &["11:00", "11:30"]);
    let mut store: MemoryStore = store_with_pending_hall_booking();

    let determination: Determination = editor
        .revalidate_with(&calendar, &mut store)
        .unwrap()
        .clone();
    assert_eq!(determination, Determination::Clear);
    assert!(editor.can_submit());
    assert_eq!(store.fetches, 1);
}

#[test]
fn test_conflict_blocks_submission() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let mut editor: DraftEditor = hall_editor(&calendar, &["10:30", "11:00"]);
    let mut store: MemoryStore = store_with_pending_hall_booking();

    match editor.revalidate_with(&calendar, &mut store).unwrap() {
        Determination::Blocked(report) => {
            assert_eq!(report.len(), 1);
            assert_eq!(report.entries()[0].booking_id, Some(1));
        }
        other => panic!("expected a conflict, got {other:?}"),
    }
    assert!(!editor.can_submit());
}

#[test]
fn test_any_change_resets_determination() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let mut store: MemoryStore = store_with_pending_hall_booking();

    let mut editor: DraftEditor = hall_editor(&calendar, &["14:00"]);
    editor.revalidate_with(&calendar, &mut store).unwrap();
    assert!(editor.can_submit());
    editor.set_date(date!(2025 - 03 - 11));
    assert_eq!(editor.determination(), &Determination::Unchecked);
    assert_eq!(editor.changed_fields(), vec![DraftField::Date]);

    editor.revalidate_with(&calendar, &mut store).unwrap();
    editor.set_resource(ResourceRef::venue("auditorium"));
    assert!(!editor.can_submit());

    editor.revalidate_with(&calendar, &mut store).unwrap();
    editor.toggle_slot(&calendar, slot("14:30")).unwrap();
    assert!(!editor.can_submit());

    editor.revalidate_with(&calendar, &mut store).unwrap();
    editor.select_full_day(&calendar);
    assert!(!editor.can_submit());
}

#[test]
fn test_setting_same_value_keeps_determination() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let mut store: MemoryStore = store_with_pending_hall_booking();
    let mut editor: DraftEditor = hall_editor(&calendar, &["14:00"]);
    editor.revalidate_with(&calendar, &mut store).unwrap();

    editor.set_date(date!(2025 - 03 - 10));
    editor.set_resource(ResourceRef::venue("ramanujan-hall"));
    assert!(editor.can_submit());
}

#[test]
fn test_failed_fetch_makes_no_determination() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let mut store: MemoryStore = store_with_pending_hall_booking();
    let mut editor: DraftEditor = hall_editor(&calendar, &["11:00"]);
    editor.revalidate_with(&calendar, &mut store).unwrap();
    assert!(editor.can_submit());

    editor.toggle_slot(&calendar, slot("11:30")).unwrap();
    store.offline = true;
    let result = editor.revalidate_with(&calendar, &mut store);
    assert!(matches!(result, Err(CoreError::SnapshotUnavailable(_))));
    assert_eq!(editor.determination(), &Determination::Unchecked);
    assert!(!editor.can_submit());
}

#[test]
fn test_empty_selection_is_rejected_before_fetch() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let mut store: MemoryStore = store_with_pending_hall_booking();
    let mut editor: DraftEditor = hall_editor(&calendar, &["11:00"]);
    editor.toggle_slot(&calendar, slot("11:00")).unwrap();

    assert!(editor.revalidate_with(&calendar, &mut store).is_err());
    assert_eq!(store.fetches, 0);
    assert!(!editor.can_submit());
}

#[test]
fn test_break_slot_cannot_be_toggled() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let mut editor: DraftEditor = DraftEditor::new();
    assert!(editor.toggle_slot(&calendar, slot("13:00")).is_err());
    assert!(editor.slots().is_empty());
}

#[test]
fn test_full_day_then_custom() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let mut editor: DraftEditor = DraftEditor::new();
    editor.select_full_day(&calendar);
    assert_eq!(editor.slots().len(), 14);
    assert_eq!(
        editor.duration_mode(),
        campus_book_domain::DurationMode::FullDay
    );

    editor.select_custom();
    assert!(editor.slots().is_empty());

    editor.select_full_day(&calendar);
    editor.toggle_slot(&calendar, slot("09:00")).unwrap();
    assert_eq!(editor.slots().len(), 13);
    assert_eq!(
        editor.duration_mode(),
        campus_book_domain::DurationMode::Custom
    );
}

#[test]
fn test_revalidate_against_fetched_snapshot() {
    let calendar: SlotCalendar = SlotCalendar::standard();
    let store: MemoryStore = store_with_pending_hall_booking();
    let mut editor: DraftEditor = hall_editor(&calendar, &["10:00"]);
    let determination = editor.revalidate(&calendar, &store.bookings).unwrap();
    assert!(matches!(determination, Determination::Blocked(_)));
}
