// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use campus_book::CoreError;
use campus_book_domain::DomainError;
use campus_book_persistence::PersistenceError;

use crate::request_response::ConflictInfo;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The requested slots collide with active bookings.
    BookingConflict {
        /// The colliding bookings, in display order.
        conflicts: Vec<ConflictInfo>,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::BookingConflict { conflicts } => {
                write!(
                    f,
                    "The selected slots conflict with {} existing booking(s)",
                    conflicts.len()
                )
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::EmptySlotSet
        | DomainError::InvalidSlot { .. }
        | DomainError::SlotOutsideVocabulary { .. }
        | DomainError::FullDayMismatch { .. } => ApiError::InvalidInput {
            field: String::from("slots"),
            message,
        },
        DomainError::InvalidCalendarConfig { .. } => ApiError::Internal { message },
        DomainError::InvalidResourceType(_) | DomainError::InvalidResourceRef { .. } => {
            ApiError::InvalidInput {
                field: String::from("resource"),
                message,
            }
        }
        DomainError::UnknownResource(key) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message: format!("Resource '{key}' is not in the catalog"),
        },
        DomainError::InvalidBookingStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::InvalidDurationMode(_) => ApiError::InvalidInput {
            field: String::from("duration_mode"),
            message,
        },
        DomainError::InvalidStatusTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("booking_lifecycle"),
            message,
        },
        DomainError::MissingStatusReason { .. } => ApiError::InvalidInput {
            field: String::from("reason"),
            message,
        },
        DomainError::InvalidEventDetails { field, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::UnknownDepartment { .. } => ApiError::InvalidInput {
            field: String::from("department"),
            message,
        },
        DomainError::AttendeesExceedCapacity { .. } => ApiError::DomainRuleViolation {
            rule: String::from("resource_capacity"),
            message,
        },
        DomainError::InvalidRequester(_) => ApiError::InvalidInput {
            field: String::from("requester"),
            message,
        },
        DomainError::DateParseError { .. } => ApiError::InvalidInput {
            field: String::from("booking_date"),
            message,
        },
        DomainError::InvalidTimezone(_) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message,
        },
        DomainError::InvalidVisibilityPolicy(_) => ApiError::InvalidInput {
            field: String::from("calendar_visibility"),
            message,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::BookingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {id} does not exist"),
        },
        CoreError::ConflictDetected(report) => ApiError::BookingConflict {
            conflicts: report
                .in_display_order()
                .iter()
                .map(ConflictInfo::from_entry)
                .collect(),
        },
        CoreError::SnapshotUnavailable(msg) => ApiError::Internal {
            message: format!("Could not load existing bookings: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::BookingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {id} does not exist"),
        },
        PersistenceError::NotificationNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Notification"),
            message: format!("Notification {id} does not exist"),
        },
        PersistenceError::StatusChanged { booking_id } => ApiError::DomainRuleViolation {
            rule: String::from("booking_lifecycle"),
            message: format!("Booking {booking_id} was changed by another reviewer"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
