// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Explicit revalidation pipeline for a booking draft being edited.
//!
//! Any change to the draft's resource, date, or slots discards the previous
//! conflict determination. The caller then fetches a fresh snapshot and calls
//! [`DraftEditor::revalidate`]. If that fetch fails the draft stays
//! `Unchecked`, which is distinct from `Clear` and never allows submission.

use crate::error::CoreError;
use crate::store::BookingStore;
use campus_book_domain::{
    Booking, BookingDraft, ConflictReport, DomainError, DurationMode, ResourceKey, ResourceRef,
    Slot, SlotCalendar, SlotSet, find_conflicts_for_key, toggle_slot,
};
use std::collections::BTreeSet;
use time::Date;

/// The draft field that changed since the last check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DraftField {
    /// The requested resource.
    Resource,
    /// The booking date.
    Date,
    /// The slot selection or duration mode.
    Slots,
}

/// Outcome of the latest conflict check on a draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Determination {
    /// No check has run since the last change, or the last fetch failed.
    #[default]
    Unchecked,
    /// The last check found no conflicts.
    Clear,
    /// The last check found conflicts.
    Blocked(ConflictReport),
}

/// A booking draft under edit, with its conflict determination.
#[derive(Debug, Clone, Default)]
pub struct DraftEditor {
    resource: Option<ResourceRef>,
    booking_date: Option<Date>,
    slots: SlotSet,
    duration_mode: DurationMode,
    determination: Determination,
    changed: BTreeSet<DraftField>,
}

impl DraftEditor {
    /// Creates an empty editor in custom duration mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the requested resource.
    pub fn set_resource(&mut self, resource: ResourceRef) {
        if self.resource.as_ref() != Some(&resource) {
            self.resource = Some(resource);
            self.mark_changed(DraftField::Resource);
        }
    }

    /// Sets the booking date.
    pub fn set_date(&mut self, booking_date: Date) {
        if self.booking_date != Some(booking_date) {
            self.booking_date = Some(booking_date);
            self.mark_changed(DraftField::Date);
        }
    }

    /// Toggles one slot, switching the draft to custom mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is not part of the calendar.
    pub fn toggle_slot(&mut self, calendar: &SlotCalendar, slot: Slot) -> Result<(), DomainError> {
        if !calendar.contains(&slot) {
            return Err(DomainError::SlotOutsideVocabulary { slot: slot.label() });
        }
        self.slots = toggle_slot(&self.slots, slot);
        self.duration_mode = DurationMode::Custom;
        self.mark_changed(DraftField::Slots);
        Ok(())
    }

    /// Selects the whole business day.
    pub fn select_full_day(&mut self, calendar: &SlotCalendar) {
        let full: SlotSet = calendar.full_day_set();
        if self.duration_mode != DurationMode::FullDay || self.slots != full {
            self.slots = full;
            self.duration_mode = DurationMode::FullDay;
            self.mark_changed(DraftField::Slots);
        }
    }

    /// Returns to custom mode with no slots selected.
    pub fn select_custom(&mut self) {
        if self.duration_mode != DurationMode::Custom || !self.slots.is_empty() {
            self.slots = SlotSet::new();
            self.duration_mode = DurationMode::Custom;
            self.mark_changed(DraftField::Slots);
        }
    }

    /// Currently selected slots.
    #[must_use]
    pub const fn slots(&self) -> &SlotSet {
        &self.slots
    }

    /// Current duration mode.
    #[must_use]
    pub const fn duration_mode(&self) -> DurationMode {
        self.duration_mode
    }

    /// The latest determination.
    #[must_use]
    pub const fn determination(&self) -> &Determination {
        &self.determination
    }

    /// Fields changed since the last successful check, in a stable order.
    #[must_use]
    pub fn changed_fields(&self) -> Vec<DraftField> {
        self.changed.iter().copied().collect()
    }

    /// The draft, once resource, date, and at least one slot are set.
    #[must_use]
    pub fn draft(&self) -> Option<BookingDraft> {
        let resource: ResourceRef = self.resource.clone()?;
        let booking_date: Date = self.booking_date?;
        if self.slots.is_empty() {
            return None;
        }
        Some(BookingDraft {
            resource,
            booking_date,
            slots: self.slots.clone(),
            duration_mode: self.duration_mode,
        })
    }

    /// Returns true when a complete draft has no current determination.
    #[must_use]
    pub fn needs_check(&self) -> bool {
        self.determination == Determination::Unchecked && self.draft().is_some()
    }

    /// Submission is allowed only after a check came back clear.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.determination == Determination::Clear
    }

    /// Runs the conflict check against a snapshot the caller already fetched.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DomainViolation` if the draft is incomplete or
    /// invalid. The determination stays `Unchecked` in that case.
    pub fn revalidate(
        &mut self,
        calendar: &SlotCalendar,
        snapshot: &[Booking],
    ) -> Result<&Determination, CoreError> {
        let (draft, key) = self.checked_draft(calendar)?;
        self.resolve(&key, &draft, snapshot);
        Ok(&self.determination)
    }

    /// Fetches the resource's bookings from the store and runs the check.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SnapshotUnavailable` if the fetch fails, without
    /// making a determination.
    pub fn revalidate_with<S: BookingStore>(
        &mut self,
        calendar: &SlotCalendar,
        store: &mut S,
    ) -> Result<&Determination, CoreError> {
        let (draft, key) = self.checked_draft(calendar)?;
        match store.bookings_for_resource(&key) {
            Ok(snapshot) => {
                self.resolve(&key, &draft, &snapshot);
                Ok(&self.determination)
            }
            Err(e) => {
                self.determination = Determination::Unchecked;
                Err(CoreError::SnapshotUnavailable(e.to_string()))
            }
        }
    }

    fn checked_draft(
        &mut self,
        calendar: &SlotCalendar,
    ) -> Result<(BookingDraft, ResourceKey), CoreError> {
        self.determination = Determination::Unchecked;
        let draft: BookingDraft = self.draft().ok_or_else(|| {
            if self.slots.is_empty() {
                DomainError::EmptySlotSet
            } else {
                DomainError::InvalidResourceRef {
                    reason: String::from("resource and date must be chosen first"),
                }
            }
        })?;
        let key: ResourceKey = draft.validate(calendar)?;
        Ok((draft, key))
    }

    fn resolve(&mut self, key: &ResourceKey, draft: &BookingDraft, snapshot: &[Booking]) {
        let report: ConflictReport = find_conflicts_for_key(key, draft, snapshot);
        self.determination = if report.is_clear() {
            Determination::Clear
        } else {
            Determination::Blocked(report)
        };
        self.changed.clear();
    }

    fn mark_changed(&mut self, field: DraftField) {
        self.changed.insert(field);
        self.determination = Determination::Unchecked;
    }
}
