// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_book_domain::{BookingDetails, BookingDraft, BookingStatus, Requester};

/// A command represents user or administrator intent as data only.
///
/// Commands are the only way to request booking state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a new booking request.
    SubmitBooking {
        /// Resource, date, and slots.
        draft: BookingDraft,
        /// Event details.
        details: BookingDetails,
        /// Who is asking.
        requester: Requester,
    },
    /// Approve a pending booking.
    ApproveBooking {
        /// The booking to approve.
        booking_id: i64,
    },
    /// Reject a pending booking.
    RejectBooking {
        /// The booking to reject.
        booking_id: i64,
        /// Why it was rejected.
        reason: String,
    },
    /// Cancel a pending or approved booking.
    CancelBooking {
        /// The booking to cancel.
        booking_id: i64,
        /// Why it was cancelled.
        reason: String,
    },
}

impl Command {
    /// The booking a review command targets, if any.
    #[must_use]
    pub const fn target_booking_id(&self) -> Option<i64> {
        match self {
            Self::SubmitBooking { .. } => None,
            Self::ApproveBooking { booking_id }
            | Self::RejectBooking { booking_id, .. }
            | Self::CancelBooking { booking_id, .. } => Some(*booking_id),
        }
    }

    /// The status a review command moves its booking to.
    #[must_use]
    pub const fn target_status(&self) -> BookingStatus {
        match self {
            Self::SubmitBooking { .. } => BookingStatus::Pending,
            Self::ApproveBooking { .. } => BookingStatus::Approved,
            Self::RejectBooking { .. } => BookingStatus::Rejected,
            Self::CancelBooking { .. } => BookingStatus::Cancelled,
        }
    }
}
