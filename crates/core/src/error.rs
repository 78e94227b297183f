// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_book_domain::{ConflictReport, DomainError};

/// Errors that can occur during booking state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The targeted booking is not in the supplied state.
    BookingNotFound(i64),
    /// The draft collides with active bookings.
    ConflictDetected(ConflictReport),
    /// The booking snapshot could not be fetched, so no determination was made.
    SnapshotUnavailable(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::BookingNotFound(id) => write!(f, "Booking {id} not found"),
            Self::ConflictDetected(report) => write!(
                f,
                "The selected slots conflict with {} existing booking(s)",
                report.len()
            ),
            Self::SnapshotUnavailable(msg) => {
                write!(f, "Could not load existing bookings: {msg}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
