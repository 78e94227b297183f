// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A booking draft was given no slots.
    EmptySlotSet,
    /// A slot string is not a well-formed `HH:MM` half-hour value.
    InvalidSlot {
        /// The offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A slot is well-formed but not part of the configured day.
    SlotOutsideVocabulary {
        /// The offending slot.
        slot: String,
    },
    /// The slot calendar configuration is inconsistent.
    InvalidCalendarConfig {
        /// Description of the problem.
        reason: String,
    },
    /// A full-day draft does not carry the full-day slot sequence.
    FullDayMismatch {
        /// Number of slots the draft carries.
        actual: usize,
        /// Number of slots in the full-day sequence.
        expected: usize,
    },
    /// Resource type string is not recognised.
    InvalidResourceType(String),
    /// Resource reference is missing its id or sub-area.
    InvalidResourceRef {
        /// Description of the problem.
        reason: String,
    },
    /// Resource key does not resolve to a catalog entry.
    UnknownResource(String),
    /// Booking status string is not recognised.
    InvalidBookingStatus(String),
    /// Duration mode string is not recognised.
    InvalidDurationMode(String),
    /// A status transition is not allowed by the booking lifecycle.
    InvalidStatusTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// A reason is mandatory for this transition but none was given.
    MissingStatusReason {
        /// The target status.
        to: String,
    },
    /// An event detail field is empty or invalid.
    InvalidEventDetails {
        /// The field that failed.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },
    /// The department does not belong to the declared category.
    UnknownDepartment {
        /// The declared category.
        category: String,
        /// The declared department.
        department: String,
    },
    /// Attendance is larger than the resource can hold.
    AttendeesExceedCapacity {
        /// The resource key.
        resource: String,
        /// Requested attendance.
        attendees: u32,
        /// Catalog capacity.
        capacity: u32,
    },
    /// Requester metadata is incomplete.
    InvalidRequester(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Timezone name is not a known IANA zone.
    InvalidTimezone(String),
    /// Calendar visibility policy string is not recognised.
    InvalidVisibilityPolicy(String),
}

impl DomainError {
    /// Returns true for the precondition failures a caller must reject
    /// before running a conflict check (empty or out-of-vocabulary slots).
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptySlotSet
                | Self::InvalidSlot { .. }
                | Self::SlotOutsideVocabulary { .. }
                | Self::FullDayMismatch { .. }
        )
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySlotSet => write!(f, "At least one time slot must be selected"),
            Self::InvalidSlot { value, reason } => {
                write!(f, "Invalid slot '{value}': {reason}")
            }
            Self::SlotOutsideVocabulary { slot } => {
                write!(f, "Slot {slot} is not a bookable slot of the business day")
            }
            Self::InvalidCalendarConfig { reason } => {
                write!(f, "Invalid slot calendar configuration: {reason}")
            }
            Self::FullDayMismatch { actual, expected } => {
                write!(
                    f,
                    "Full-day booking must cover all {expected} slots, got {actual}"
                )
            }
            Self::InvalidResourceType(value) => write!(f, "Invalid resource type: {value}"),
            Self::InvalidResourceRef { reason } => {
                write!(f, "Invalid resource reference: {reason}")
            }
            Self::UnknownResource(key) => write!(f, "Resource '{key}' is not in the catalog"),
            Self::InvalidBookingStatus(value) => write!(f, "Invalid booking status: {value}"),
            Self::InvalidDurationMode(value) => write!(f, "Invalid duration mode: {value}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot move booking from {from} to {to}: {reason}")
            }
            Self::MissingStatusReason { to } => {
                write!(f, "A reason is required to mark a booking {to}")
            }
            Self::InvalidEventDetails { field, reason } => {
                write!(f, "Invalid {field}: {reason}")
            }
            Self::UnknownDepartment {
                category,
                department,
            } => {
                write!(
                    f,
                    "Department '{department}' does not belong to category '{category}'"
                )
            }
            Self::AttendeesExceedCapacity {
                resource,
                attendees,
                capacity,
            } => {
                write!(
                    f,
                    "{attendees} attendees exceeds the capacity of {resource} ({capacity})"
                )
            }
            Self::InvalidRequester(msg) => write!(f, "Invalid requester: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::InvalidVisibilityPolicy(value) => {
                write!(f, "Invalid calendar visibility policy: {value}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
