// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use campus_book_audit::Actor;
use campus_book_domain::{Booking, CalendarViewer};
use std::str::FromStr;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: staff who review bookings.
    ///
    /// Admins may:
    /// - approve, reject, and cancel any booking
    /// - view every booking and its audit timeline
    /// - see every booking on the calendar
    Admin,
    /// Requester role: students and faculty asking for resources.
    ///
    /// Requesters may:
    /// - check drafts for conflicts
    /// - submit bookings in their own name
    /// - view their own bookings, audit timelines, and notifications
    Requester,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Requester => "requester",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "requester" => Ok(Self::Requester),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {s}"),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns true for administrators.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role.as_str().to_string())
    }

    /// The calendar viewer this actor corresponds to.
    #[must_use]
    pub fn to_viewer(&self) -> CalendarViewer {
        match self.role {
            Role::Admin => CalendarViewer::admin(&self.id),
            Role::Requester => CalendarViewer::requester(&self.id),
        }
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to review a booking.
    ///
    /// Only Admin actors may approve, reject, or cancel.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The review action name, used in the error
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_review(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Requester => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor may see a booking's details and audit trail.
    ///
    /// Admins see every booking; requesters see their own.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking belongs to someone else.
    pub fn authorize_view_booking(
        actor: &AuthenticatedActor,
        booking: &Booking,
    ) -> Result<(), AuthError> {
        if actor.is_admin() || booking.requester.requester_id == actor.id {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("view_booking"),
            required_role: String::from("Admin"),
        })
    }

    /// Checks if an actor may list another user's bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if a requester asks for someone else's bookings.
    pub fn authorize_list_for(
        actor: &AuthenticatedActor,
        requester_id: &str,
    ) -> Result<(), AuthError> {
        if actor.is_admin() || actor.id == requester_id {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("list_bookings"),
            required_role: String::from("Admin"),
        })
    }
}

/// Stub authentication function.
///
/// Real authentication is handled outside this system; callers supply an
/// actor id and role they have already verified.
///
/// # Arguments
///
/// * `actor_id` - The identifier of the actor to authenticate
/// * `role` - The role to assign to the actor
///
/// # Errors
///
/// Returns an error if the actor id is blank.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}
