// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_book_domain::{Booking, BookingStatus, SlotCalendar, describe_slots};
use std::str::FromStr;

/// Severity of an in-app notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Neutral information.
    Info,
    /// Something went the requester's way.
    Success,
    /// Something changed that needs attention.
    Warning,
    /// A request was refused.
    Error,
}

impl NotificationKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// The kind used for a booking moving to `status`.
    #[must_use]
    pub const fn for_status(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Pending => Self::Info,
            BookingStatus::Approved => Self::Success,
            BookingStatus::Rejected => Self::Error,
            BookingStatus::Cancelled => Self::Warning,
        }
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(format!("Invalid notification kind: {s}")),
        }
    }
}

/// A message to a requester about their booking's new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The booking after the transition.
    pub booking: Booking,
    /// The status the booking moved to.
    pub status: BookingStatus,
    /// Reason given for a rejection or cancellation.
    pub reason: Option<String>,
    /// Short subject line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    pub kind: NotificationKind,
}

impl Notification {
    /// Builds the requester notification for a reviewed booking.
    #[must_use]
    pub fn for_transition(booking: &Booking, calendar: &SlotCalendar) -> Self {
        let status: BookingStatus = booking.status;
        let when: String = describe_slots(calendar, booking.slots(), booking.draft.duration_mode)
            .unwrap_or_else(|_| calendar.full_day_label());

        let mut message: String = format!(
            "Your booking '{}' for {} on {} ({}) has been {}.",
            booking.details.event_title,
            booking.resource_name,
            booking.booking_date(),
            when,
            status.as_str().to_lowercase()
        );
        match (&booking.status_reason, status) {
            (Some(reason), _) => {
                message.push_str(" Reason: ");
                message.push_str(reason);
            }
            (None, BookingStatus::Cancelled) => message.push_str(" No reason provided."),
            _ => {}
        }

        Self {
            booking: booking.clone(),
            status,
            reason: booking.status_reason.clone(),
            title: format!("Booking {status}: {}", booking.details.event_title),
            message,
            kind: NotificationKind::for_status(status),
        }
    }

    /// The user the notification is addressed to.
    #[must_use]
    pub fn recipient_id(&self) -> &str {
        &self.booking.requester.requester_id
    }
}
