// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::resource::{ResourceKey, ResourceRef};
use crate::slot::{SlotCalendar, SlotSet};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Lifecycle status of a persisted booking.
///
/// Valid transitions are:
/// - `Pending` → `Approved`
/// - `Pending` → `Rejected` (reason required)
/// - `Pending` → `Cancelled` (reason required)
/// - `Approved` → `Cancelled` (reason required)
///
/// `Rejected` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// Submitted and awaiting review.
    #[default]
    Pending,
    /// Accepted by an administrator.
    Approved,
    /// Refused by an administrator.
    Rejected,
    /// Withdrawn by an administrator.
    Cancelled,
}

impl BookingStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Active bookings hold their slots and take part in conflict detection.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Terminal bookings accept no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }

    /// Returns true if moving to `target` requires a reason.
    #[must_use]
    pub const fn requires_reason(target: Self) -> bool {
        matches!(target, Self::Rejected | Self::Cancelled)
    }

    /// Checks whether moving from this status to `target` is allowed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the lifecycle does
    /// not allow the move, or `DomainError::MissingStatusReason` when a
    /// rejection or cancellation has no non-blank reason.
    pub fn validate_transition(&self, target: Self, reason: Option<&str>) -> Result<(), DomainError> {
        let refuse = |why: &str| DomainError::InvalidStatusTransition {
            from: self.as_str().to_string(),
            to: target.as_str().to_string(),
            reason: why.to_string(),
        };

        if self.is_terminal() {
            return Err(refuse("booking is already closed"));
        }

        match (self, target) {
            (Self::Pending, Self::Approved | Self::Rejected | Self::Cancelled)
            | (Self::Approved, Self::Cancelled) => {}
            (_, Self::Pending) => return Err(refuse("bookings never return to Pending")),
            (Self::Approved, Self::Approved) => return Err(refuse("booking is already Approved")),
            _ => return Err(refuse("transition is not part of the booking lifecycle")),
        }

        if Self::requires_reason(target) && reason.is_none_or(|r| r.trim().is_empty()) {
            return Err(DomainError::MissingStatusReason {
                to: target.as_str().to_string(),
            });
        }

        Ok(())
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidBookingStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a booking's slots were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DurationMode {
    /// An explicit set of slots.
    #[default]
    #[serde(rename = "custom")]
    Custom,
    /// The whole business day.
    #[serde(rename = "full-day")]
    FullDay,
}

impl DurationMode {
    /// Converts this mode to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::FullDay => "full-day",
        }
    }
}

impl FromStr for DurationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "custom" => Ok(Self::Custom),
            "full-day" => Ok(Self::FullDay),
            _ => Err(DomainError::InvalidDurationMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for DurationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A requested booking before it is stored: what, when, and which slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    /// The requested resource.
    pub resource: ResourceRef,
    /// Calendar date of the booking.
    pub booking_date: Date,
    /// Selected slots.
    pub slots: SlotSet,
    /// How the slots were chosen.
    pub duration_mode: DurationMode,
}

impl BookingDraft {
    /// A draft with an explicit slot set.
    #[must_use]
    pub const fn custom(resource: ResourceRef, booking_date: Date, slots: SlotSet) -> Self {
        Self {
            resource,
            booking_date,
            slots,
            duration_mode: DurationMode::Custom,
        }
    }

    /// A draft covering the whole business day.
    #[must_use]
    pub fn full_day(resource: ResourceRef, booking_date: Date, calendar: &SlotCalendar) -> Self {
        Self {
            resource,
            booking_date,
            slots: calendar.full_day_set(),
            duration_mode: DurationMode::FullDay,
        }
    }

    /// Derives the resource key of the requested resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource reference is incomplete.
    pub fn resource_key(&self) -> Result<ResourceKey, DomainError> {
        self.resource.key()
    }

    /// Checks the draft's structural invariants and returns its key.
    ///
    /// The slot set must be non-empty and drawn from the calendar. A
    /// full-day draft must carry exactly the full-day sequence.
    ///
    /// # Errors
    ///
    /// Returns the first invariant that fails.
    pub fn validate(&self, calendar: &SlotCalendar) -> Result<ResourceKey, DomainError> {
        let key: ResourceKey = self.resource_key()?;
        calendar.validate_slot_set(&self.slots)?;
        if self.duration_mode == DurationMode::FullDay && self.slots != calendar.full_day_set() {
            return Err(DomainError::FullDayMismatch {
                actual: self.slots.len(),
                expected: calendar.full_day_slots().len(),
            });
        }
        Ok(key)
    }
}

/// What the booking is for and who is responsible for it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookingDetails {
    /// Event title shown on calendars.
    pub event_title: String,
    /// Free-text description.
    pub event_description: String,
    /// Expected attendance.
    pub attendees: u32,
    /// Department category, e.g. Engineering.
    pub department_category: String,
    /// Department within the category.
    pub department: String,
    /// Faculty member responsible.
    pub faculty_incharge: Option<String>,
    /// Contact phone number.
    pub contact_number: Option<String>,
    /// Contact email.
    pub contact_email: Option<String>,
}

/// The user who submitted a booking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Requester {
    /// Stable user id.
    pub requester_id: String,
    /// Display name.
    pub name: String,
    /// Email address for notifications.
    pub email: String,
}

/// A stored booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// The booking's canonical numeric identifier.
    /// This is `None` for bookings that have not been persisted yet.
    pub booking_id: Option<i64>,
    /// Key derived from the draft's resource reference.
    pub resource_key: ResourceKey,
    /// Display name of the resource at submission time.
    pub resource_name: String,
    /// Resource, date, and slots.
    pub draft: BookingDraft,
    /// Event details.
    pub details: BookingDetails,
    /// Who asked for it.
    pub requester: Requester,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Reason given for a rejection or cancellation.
    pub status_reason: Option<String>,
    /// Administrator who made the last status change.
    pub reviewed_by: Option<String>,
    /// When the last status change happened.
    pub reviewed_at: Option<OffsetDateTime>,
    /// When the booking was created.
    pub created_at: Option<OffsetDateTime>,
}

impl Booking {
    /// Creates a new `Pending` booking without a persisted ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft's resource reference is incomplete.
    pub fn new(
        draft: BookingDraft,
        details: BookingDetails,
        requester: Requester,
        resource_name: &str,
    ) -> Result<Self, DomainError> {
        let resource_key: ResourceKey = draft.resource_key()?;
        Ok(Self {
            booking_id: None,
            resource_key,
            resource_name: resource_name.to_string(),
            draft,
            details,
            requester,
            status: BookingStatus::Pending,
            status_reason: None,
            reviewed_by: None,
            reviewed_at: None,
            created_at: None,
        })
    }

    /// Returns this booking with the given persisted ID.
    #[must_use]
    pub const fn with_id(mut self, booking_id: i64) -> Self {
        self.booking_id = Some(booking_id);
        self
    }

    /// Calendar date of the booking.
    #[must_use]
    pub const fn booking_date(&self) -> Date {
        self.draft.booking_date
    }

    /// Selected slots.
    #[must_use]
    pub const fn slots(&self) -> &SlotSet {
        &self.draft.slots
    }

    /// Returns true while the booking holds its slots.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Produces the booking as it would be after moving to `target`.
    ///
    /// The reason is trimmed and recorded for rejections and cancellations.
    /// `reviewed_at` is left for the store to stamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the lifecycle refuses the transition.
    pub fn transition(
        &self,
        target: BookingStatus,
        reason: Option<&str>,
        reviewed_by: &str,
    ) -> Result<Self, DomainError> {
        self.status.validate_transition(target, reason)?;
        let mut next: Self = self.clone();
        next.status = target;
        next.status_reason = if BookingStatus::requires_reason(target) {
            reason.map(|r| r.trim().to_string())
        } else {
            None
        };
        next.reviewed_by = Some(reviewed_by.to_string());
        next.reviewed_at = None;
        Ok(next)
    }
}
