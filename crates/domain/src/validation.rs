// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking::{BookingDetails, BookingDraft, Requester};
use crate::catalog::{CatalogResource, ResourceCatalog};
use crate::error::DomainError;
use crate::resource::ResourceKey;
use crate::slot::SlotCalendar;

/// Validates the event details of a booking against the booked resource.
///
/// # Errors
///
/// Returns an error if:
/// - The event title is blank
/// - Attendance is zero
/// - Attendance exceeds the resource's capacity
/// - The department does not belong to the declared category
/// - A contact email is given but is not an address
pub fn validate_booking_details(
    details: &BookingDetails,
    resource: &CatalogResource,
    catalog: &ResourceCatalog,
) -> Result<(), DomainError> {
    if details.event_title.trim().is_empty() {
        return Err(DomainError::InvalidEventDetails {
            field: "event_title",
            reason: String::from("Event title cannot be empty"),
        });
    }

    if details.attendees == 0 {
        return Err(DomainError::InvalidEventDetails {
            field: "attendees",
            reason: String::from("At least one attendee is required"),
        });
    }

    if let Some(capacity) = resource.capacity
        && details.attendees > capacity
    {
        return Err(DomainError::AttendeesExceedCapacity {
            resource: resource.name.clone(),
            attendees: details.attendees,
            capacity,
        });
    }

    catalog.validate_department(&details.department_category, &details.department)?;

    if let Some(email) = details.contact_email.as_deref()
        && !email.trim().is_empty()
        && !looks_like_email(email)
    {
        return Err(DomainError::InvalidEventDetails {
            field: "contact_email",
            reason: format!("'{email}' is not an email address"),
        });
    }

    Ok(())
}

/// Validates requester metadata.
///
/// # Errors
///
/// Returns `DomainError::InvalidRequester` if the id or name is blank or the
/// email is not an address.
pub fn validate_requester(requester: &Requester) -> Result<(), DomainError> {
    if requester.requester_id.trim().is_empty() {
        return Err(DomainError::InvalidRequester(String::from(
            "Requester id cannot be empty",
        )));
    }
    if requester.name.trim().is_empty() {
        return Err(DomainError::InvalidRequester(String::from(
            "Requester name cannot be empty",
        )));
    }
    if !looks_like_email(&requester.email) {
        return Err(DomainError::InvalidRequester(format!(
            "'{}' is not an email address",
            requester.email
        )));
    }
    Ok(())
}

/// Validates everything needed to store a new booking.
///
/// The draft is checked first, so slot problems surface as invalid input
/// before any detail validation runs.
///
/// # Errors
///
/// Returns the first failing rule.
pub fn validate_submission<'c>(
    draft: &BookingDraft,
    details: &BookingDetails,
    requester: &Requester,
    calendar: &SlotCalendar,
    catalog: &'c ResourceCatalog,
) -> Result<(ResourceKey, &'c CatalogResource), DomainError> {
    let key: ResourceKey = draft.validate(calendar)?;
    let resource: &CatalogResource = catalog.lookup(&key)?;
    validate_booking_details(details, resource, catalog)?;
    validate_requester(requester)?;
    Ok((key, resource))
}

fn looks_like_email(value: &str) -> bool {
    value
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}
