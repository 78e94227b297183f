// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking::{Booking, BookingStatus};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Which bookings non-administrators may see on the calendar.
///
/// Administrators always see every booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarVisibility {
    /// Every booking regardless of status or owner.
    All,
    /// Approved bookings plus the viewer's own bookings in any status.
    #[default]
    ApprovedAndOwn,
    /// Approved bookings only.
    ApprovedOnly,
}

impl CalendarVisibility {
    /// Converts this policy to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ApprovedAndOwn => "approved-and-own",
            Self::ApprovedOnly => "approved-only",
        }
    }

    /// Returns true if `viewer` may see `booking`.
    #[must_use]
    pub fn is_visible(&self, booking: &Booking, viewer: &CalendarViewer) -> bool {
        if viewer.is_admin {
            return true;
        }
        match self {
            Self::All => true,
            Self::ApprovedOnly => booking.status == BookingStatus::Approved,
            Self::ApprovedAndOwn => {
                booking.status == BookingStatus::Approved
                    || viewer
                        .user_id
                        .as_deref()
                        .is_some_and(|id| id == booking.requester.requester_id)
            }
        }
    }

    /// The bookings on `date` visible to `viewer`, ordered by first slot.
    #[must_use]
    pub fn calendar_for_date<'a>(
        &self,
        bookings: &'a [Booking],
        date: Date,
        viewer: &CalendarViewer,
    ) -> Vec<&'a Booking> {
        let mut visible: Vec<&Booking> = bookings
            .iter()
            .filter(|b| b.booking_date() == date)
            .filter(|b| self.is_visible(b, viewer))
            .collect();
        visible.sort_by_key(|b| (b.slots().first().copied(), b.booking_id));
        visible
    }
}

impl FromStr for CalendarVisibility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "approved-and-own" => Ok(Self::ApprovedAndOwn),
            "approved-only" => Ok(Self::ApprovedOnly),
            _ => Err(DomainError::InvalidVisibilityPolicy(s.to_string())),
        }
    }
}

impl std::fmt::Display for CalendarVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who is looking at the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalendarViewer {
    /// The viewer's user id, if signed in.
    pub user_id: Option<String>,
    /// Administrators bypass the visibility policy.
    pub is_admin: bool,
}

impl CalendarViewer {
    /// An anonymous viewer.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user_id: None,
            is_admin: false,
        }
    }

    /// A signed-in requester.
    #[must_use]
    pub fn requester(user_id: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            is_admin: false,
        }
    }

    /// An administrator.
    #[must_use]
    pub fn admin(user_id: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            is_admin: true,
        }
    }
}
