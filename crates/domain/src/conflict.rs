// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conflict detection between a candidate draft and stored bookings.
//!
//! A candidate conflicts with a stored booking when all of the following hold,
//! checked in this order:
//!
//! 1. the stored booking is active (`Pending` or `Approved`)
//! 2. both share the same resource key
//! 3. both fall on the same calendar date
//! 4. their slot sets intersect
//!
//! Because bookings are slot sets rather than intervals, two bookings that
//! merely touch (one ends at `10:30`, the next starts at `10:30`) never
//! collide.

use crate::booking::{Booking, BookingDraft, BookingStatus};
use crate::resource::ResourceKey;
use crate::slot::Slot;
use serde::{Deserialize, Serialize};

/// One stored booking that collides with the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictEntry {
    /// ID of the colliding booking, if it has been persisted.
    pub booking_id: Option<i64>,
    /// Event title of the colliding booking.
    pub event_title: String,
    /// Department of the colliding booking.
    pub department: String,
    /// Status of the colliding booking.
    pub status: BookingStatus,
    /// The slots both bookings want, ascending.
    pub overlapping_slots: Vec<Slot>,
}

/// The outcome of a conflict check. Empty means no conflict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConflictReport {
    entries: Vec<ConflictEntry>,
}

impl ConflictReport {
    /// Returns true when nothing collides.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of colliding bookings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing collides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order the corpus supplied them.
    #[must_use]
    pub fn entries(&self) -> &[ConflictEntry] {
        &self.entries
    }

    /// Consumes the report, yielding its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<ConflictEntry> {
        self.entries
    }

    /// Entries sorted by booking id, unpersisted bookings last.
    #[must_use]
    pub fn in_display_order(&self) -> Vec<ConflictEntry> {
        let mut entries: Vec<ConflictEntry> = self.entries.clone();
        entries.sort_by_key(|e| (e.booking_id.is_none(), e.booking_id));
        entries
    }
}

/// Finds every active booking in `existing` that collides with `candidate`.
///
/// Corpus order is preserved. A candidate whose resource reference cannot
/// produce a key matches nothing. Callers validate the draft first; an
/// empty slot set also matches nothing.
#[must_use]
pub fn find_conflicts<'a, I>(candidate: &BookingDraft, existing: I) -> ConflictReport
where
    I: IntoIterator<Item = &'a Booking>,
{
    let Ok(candidate_key) = candidate.resource_key() else {
        return ConflictReport::default();
    };
    find_conflicts_for_key(&candidate_key, candidate, existing)
}

/// Same as [`find_conflicts`] with a key the caller already derived.
#[must_use]
pub fn find_conflicts_for_key<'a, I>(
    candidate_key: &ResourceKey,
    candidate: &BookingDraft,
    existing: I,
) -> ConflictReport
where
    I: IntoIterator<Item = &'a Booking>,
{
    let entries: Vec<ConflictEntry> = existing
        .into_iter()
        .filter(|b| b.is_active())
        .filter(|b| &b.resource_key == candidate_key)
        .filter(|b| b.booking_date() == candidate.booking_date)
        .filter_map(|b| {
            let overlapping_slots: Vec<Slot> = b.slots().intersection(&candidate.slots);
            if overlapping_slots.is_empty() {
                return None;
            }
            Some(ConflictEntry {
                booking_id: b.booking_id,
                event_title: b.details.event_title.clone(),
                department: b.details.department.clone(),
                status: b.status,
                overlapping_slots,
            })
        })
        .collect();

    ConflictReport { entries }
}
