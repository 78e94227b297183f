// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Half-hour slot vocabulary for the business day.
//!
//! The bookable day is cut into fixed 30 minute slots, each identified by its
//! start time in `HH:MM` form. A configured break (lunch by default) is
//! removed from the sequence. Bookings are sets of these slots, which lets
//! conflict detection work on set intersection instead of interval overlap.
//!
//! ## Invariants
//!
//! - Every slot starts on a half-hour boundary between `00:00` and `23:30`
//! - The full-day sequence is sorted ascending and never contains a break slot
//! - Ordering of `Slot` values matches lexicographic ordering of their labels

use crate::booking::DurationMode;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::Time;
use time::macros::time;

/// Length of one slot in minutes.
pub const SLOT_MINUTES: u16 = 30;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A single half-hour unit of bookable time, identified by its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slot {
    minute_of_day: u16,
}

impl Slot {
    /// Parses a slot from `HH:MM` (a single-digit hour is accepted).
    ///
    /// This checks the shape of the value only. Use
    /// [`SlotCalendar::parse_slot`] to also check the configured vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSlot` if the value is malformed, out of
    /// range, or not on a half-hour boundary.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let minutes: u16 = parse_clock(value)?;
        if minutes % SLOT_MINUTES != 0 {
            return Err(DomainError::InvalidSlot {
                value: value.to_string(),
                reason: String::from("slots start on the hour or half hour"),
            });
        }
        Ok(Self {
            minute_of_day: minutes,
        })
    }

    /// Builds a slot from a wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSlot` if the time has seconds or is not
    /// on a half-hour boundary.
    pub fn from_time(t: Time) -> Result<Self, DomainError> {
        let minutes: u16 = minute_of_day(t);
        if t.second() != 0 || t.nanosecond() != 0 || minutes % SLOT_MINUTES != 0 {
            return Err(DomainError::InvalidSlot {
                value: t.to_string(),
                reason: String::from("slots start on the hour or half hour"),
            });
        }
        Ok(Self {
            minute_of_day: minutes,
        })
    }

    /// Minutes since midnight at which this slot starts.
    #[must_use]
    pub const fn minute_of_day(&self) -> u16 {
        self.minute_of_day
    }

    /// The `HH:MM` label of the slot start.
    #[must_use]
    pub fn label(&self) -> String {
        format_clock(self.minute_of_day)
    }

    /// The `HH:MM` label 30 minutes after the slot start.
    ///
    /// The last slot of the day (`23:30`) ends at `24:00`.
    #[must_use]
    pub fn end_label(&self) -> String {
        format_clock(self.minute_of_day + SLOT_MINUTES)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<String> for Slot {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        slot.label()
    }
}

/// An ordered set of slots making up a booking's duration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotSet {
    slots: BTreeSet<Slot>,
}

impl SlotSet {
    /// Creates an empty slot set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: BTreeSet::new(),
        }
    }

    /// Returns true when no slot is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of selected slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the slot is selected.
    #[must_use]
    pub fn contains(&self, slot: &Slot) -> bool {
        self.slots.contains(slot)
    }

    /// Adds a slot. Returns false if it was already present.
    pub fn insert(&mut self, slot: Slot) -> bool {
        self.slots.insert(slot)
    }

    /// Removes a slot. Returns false if it was not present.
    pub fn remove(&mut self, slot: &Slot) -> bool {
        self.slots.remove(slot)
    }

    /// Iterates the slots in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Earliest slot, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Slot> {
        self.slots.first()
    }

    /// Latest slot, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Slot> {
        self.slots.last()
    }

    /// Returns true when the two sets share at least one slot.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.slots.is_disjoint(&other.slots)
    }

    /// Slots present in both sets, ascending.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Vec<Slot> {
        self.slots.intersection(&other.slots).copied().collect()
    }

    /// The `HH:MM` labels of all slots, ascending.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.slots.iter().map(Slot::label).collect()
    }
}

impl FromIterator<Slot> for SlotSet {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SlotSet {
    type Item = &'a Slot;
    type IntoIter = std::collections::btree_set::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

/// A break removed from the bookable day (e.g. lunch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakWindow {
    /// First minute of the break.
    pub start: Time,
    /// First minute after the break.
    pub end: Time,
}

/// Shape of the bookable day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCalendarConfig {
    /// Start of the first slot.
    pub day_start: Time,
    /// End of the last slot.
    pub day_end: Time,
    /// Optional break with no bookable slots.
    pub break_window: Option<BreakWindow>,
}

impl Default for SlotCalendarConfig {
    /// 09:00 to 17:00 with lunch from 13:00 to 14:00.
    fn default() -> Self {
        Self {
            day_start: time!(09:00),
            day_end: time!(17:00),
            break_window: Some(BreakWindow {
                start: time!(13:00),
                end: time!(14:00),
            }),
        }
    }
}

/// The configured slot vocabulary for every bookable day.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCalendar {
    config: SlotCalendarConfig,
    slots: Vec<Slot>,
}

impl SlotCalendar {
    /// Builds the slot vocabulary from a day configuration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCalendarConfig` if any bound is off the
    /// half-hour grid, the day is empty, or the break lies outside the day.
    pub fn new(config: SlotCalendarConfig) -> Result<Self, DomainError> {
        let day_start: u16 = aligned_minutes(config.day_start, "day start")?;
        let day_end: u16 = aligned_minutes(config.day_end, "day end")?;
        if day_start >= day_end {
            return Err(DomainError::InvalidCalendarConfig {
                reason: format!(
                    "day start {} must be before day end {}",
                    format_clock(day_start),
                    format_clock(day_end)
                ),
            });
        }

        let break_range: Option<(u16, u16)> = match config.break_window {
            Some(window) => {
                let start: u16 = aligned_minutes(window.start, "break start")?;
                let end: u16 = aligned_minutes(window.end, "break end")?;
                if start >= end {
                    return Err(DomainError::InvalidCalendarConfig {
                        reason: String::from("break start must be before break end"),
                    });
                }
                if start < day_start || end > day_end {
                    return Err(DomainError::InvalidCalendarConfig {
                        reason: String::from("break must fall inside the business day"),
                    });
                }
                Some((start, end))
            }
            None => None,
        };

        let slots: Vec<Slot> = (day_start..day_end)
            .step_by(usize::from(SLOT_MINUTES))
            .filter(|m| !break_range.is_some_and(|(start, end)| (start..end).contains(m)))
            .map(|minute_of_day| Slot { minute_of_day })
            .collect();

        if slots.is_empty() {
            return Err(DomainError::InvalidCalendarConfig {
                reason: String::from("the break covers the whole day"),
            });
        }

        Ok(Self { config, slots })
    }

    /// The default campus day: 09:00-17:00 with a 13:00-14:00 break.
    #[must_use]
    pub fn standard() -> Self {
        let config: SlotCalendarConfig = SlotCalendarConfig::default();
        let slots: Vec<Slot> = [
            540, 570, 600, 630, 660, 690, 720, 750, 840, 870, 900, 930, 960, 990,
        ]
        .into_iter()
        .map(|minute_of_day| Slot { minute_of_day })
        .collect();
        Self { config, slots }
    }

    /// The configuration this calendar was built from.
    #[must_use]
    pub const fn config(&self) -> &SlotCalendarConfig {
        &self.config
    }

    /// The full-day slot sequence, ascending.
    #[must_use]
    pub fn full_day_slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The full-day sequence as a slot set.
    #[must_use]
    pub fn full_day_set(&self) -> SlotSet {
        self.slots.iter().copied().collect()
    }

    /// Returns true if the slot is part of the bookable day.
    #[must_use]
    pub fn contains(&self, slot: &Slot) -> bool {
        self.slots.binary_search(slot).is_ok()
    }

    /// Parses a slot and checks it is part of the bookable day.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSlot` for malformed values and
    /// `DomainError::SlotOutsideVocabulary` for slots outside the day or
    /// inside the break.
    pub fn parse_slot(&self, value: &str) -> Result<Slot, DomainError> {
        let slot: Slot = Slot::parse(value)?;
        if !self.contains(&slot) {
            return Err(DomainError::SlotOutsideVocabulary { slot: slot.label() });
        }
        Ok(slot)
    }

    /// Parses a list of slot labels into a slot set.
    ///
    /// Duplicates collapse. The result may be empty.
    ///
    /// # Errors
    ///
    /// Returns the first slot parse failure.
    pub fn parse_slots<S: AsRef<str>>(&self, values: &[S]) -> Result<SlotSet, DomainError> {
        values
            .iter()
            .map(|v| self.parse_slot(v.as_ref()))
            .collect::<Result<SlotSet, DomainError>>()
    }

    /// Checks that a slot set is non-empty and drawn from the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptySlotSet` or
    /// `DomainError::SlotOutsideVocabulary`.
    pub fn validate_slot_set(&self, slots: &SlotSet) -> Result<(), DomainError> {
        if slots.is_empty() {
            return Err(DomainError::EmptySlotSet);
        }
        if let Some(stray) = slots.iter().find(|s| !self.contains(s)) {
            return Err(DomainError::SlotOutsideVocabulary {
                slot: stray.label(),
            });
        }
        Ok(())
    }

    /// Toggles a slot given as a label, after checking the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is not a bookable slot.
    pub fn toggle(&self, current: &SlotSet, value: &str) -> Result<SlotSet, DomainError> {
        let slot: Slot = self.parse_slot(value)?;
        Ok(toggle_slot(current, slot))
    }

    /// Display label for a full-day booking, e.g. `Full Day (09:00 - 17:00)`.
    #[must_use]
    pub fn full_day_label(&self) -> String {
        format!(
            "Full Day ({} - {})",
            format_clock(minute_of_day(self.config.day_start)),
            format_clock(minute_of_day(self.config.day_end))
        )
    }
}

/// Adds the slot if absent, removes it if present.
///
/// The result is always sorted. No minimum size is enforced here.
#[must_use]
pub fn toggle_slot(current: &SlotSet, slot: Slot) -> SlotSet {
    let mut next: SlotSet = current.clone();
    if !next.remove(&slot) {
        next.insert(slot);
    }
    next
}

/// Returns the `(start, end)` labels covered by a slot set.
///
/// Start is the earliest slot, end is 30 minutes after the latest one.
///
/// # Errors
///
/// Returns `DomainError::EmptySlotSet` when the set is empty.
pub fn slot_range_label(slots: &SlotSet) -> Result<(String, String), DomainError> {
    match (slots.first(), slots.last()) {
        (Some(first), Some(last)) => Ok((first.label(), last.end_label())),
        _ => Err(DomainError::EmptySlotSet),
    }
}

/// Calendar label for a booking's time: the full-day label, `start - end`
/// for a single slot, or `start - end (N slots)`.
///
/// # Errors
///
/// Returns `DomainError::EmptySlotSet` for a custom booking with no slots.
pub fn describe_slots(
    calendar: &SlotCalendar,
    slots: &SlotSet,
    mode: DurationMode,
) -> Result<String, DomainError> {
    if mode == DurationMode::FullDay {
        return Ok(calendar.full_day_label());
    }
    let (start, end) = slot_range_label(slots)?;
    if slots.len() == 1 {
        Ok(format!("{start} - {end}"))
    } else {
        Ok(format!("{start} - {end} ({} slots)", slots.len()))
    }
}

/// Adds 30 minutes to an `HH:MM` time, rolling the hour over at 60 minutes.
///
/// Unlike [`Slot::parse`], any minute value is accepted.
///
/// # Errors
///
/// Returns `DomainError::InvalidSlot` if the value is not a valid `HH:MM`.
pub fn add_thirty_minutes(value: &str) -> Result<String, DomainError> {
    let minutes: u16 = parse_clock(value)?;
    Ok(format_clock(minutes + SLOT_MINUTES))
}

fn parse_clock(value: &str) -> Result<u16, DomainError> {
    let invalid = |reason: &str| DomainError::InvalidSlot {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let (hour_part, minute_part) = value
        .trim()
        .split_once(':')
        .ok_or_else(|| invalid("expected HH:MM"))?;

    if hour_part.is_empty()
        || hour_part.len() > 2
        || minute_part.len() != 2
        || !hour_part.bytes().all(|b| b.is_ascii_digit())
        || !minute_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("expected HH:MM"));
    }

    let hour: u16 = hour_part.parse().map_err(|_| invalid("expected HH:MM"))?;
    let minute: u16 = minute_part.parse().map_err(|_| invalid("expected HH:MM"))?;

    if hour > 23 {
        return Err(invalid("hour must be between 00 and 23"));
    }
    if minute > 59 {
        return Err(invalid("minute must be between 00 and 59"));
    }

    let total: u16 = hour * 60 + minute;
    debug_assert!(total < MINUTES_PER_DAY);
    Ok(total)
}

fn format_clock(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn minute_of_day(t: Time) -> u16 {
    u16::from(t.hour()) * 60 + u16::from(t.minute())
}

fn aligned_minutes(t: Time, what: &str) -> Result<u16, DomainError> {
    let minutes: u16 = minute_of_day(t);
    if t.second() != 0 || t.nanosecond() != 0 || minutes % SLOT_MINUTES != 0 {
        return Err(DomainError::InvalidCalendarConfig {
            reason: format!("{what} {t} is not on a half-hour boundary"),
        });
    }
    Ok(minutes)
}
