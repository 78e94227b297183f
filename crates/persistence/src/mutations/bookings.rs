// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking row mutations.

use campus_book_domain::{Booking, BookingStatus, format_booking_date};
use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use crate::queries::booking_exists;

/// Inserts a new booking row.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `booking` - The booking to store; its `booking_id` is ignored
/// * `created_at` - Creation timestamp to record
///
/// # Returns
///
/// The booking ID assigned by the database.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_booking(
    conn: &mut SqliteConnection,
    booking: &Booking,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let booking_date: String = format_booking_date(booking.booking_date())?;
    let slots_json: String = serde_json::to_string(booking.slots())?;
    let attendees: i32 = booking.details.attendees.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!(
            "Attendee count out of range: {}",
            booking.details.attendees
        ))
    })?;
    let resource = &booking.draft.resource;

    diesel::insert_into(bookings::table)
        .values((
            bookings::resource_type.eq(resource.resource_type.as_str()),
            bookings::resource_id.eq(resource.resource_id.as_deref()),
            bookings::sub_area.eq(resource.sub_area.as_deref()),
            bookings::resource_key.eq(booking.resource_key.as_str()),
            bookings::resource_name.eq(&booking.resource_name),
            bookings::booking_date.eq(&booking_date),
            bookings::slots_json.eq(&slots_json),
            bookings::duration_mode.eq(booking.draft.duration_mode.as_str()),
            bookings::event_title.eq(&booking.details.event_title),
            bookings::event_description.eq(&booking.details.event_description),
            bookings::attendees.eq(attendees),
            bookings::department_category.eq(&booking.details.department_category),
            bookings::department.eq(&booking.details.department),
            bookings::faculty_incharge.eq(booking.details.faculty_incharge.as_deref()),
            bookings::contact_number.eq(booking.details.contact_number.as_deref()),
            bookings::contact_email.eq(booking.details.contact_email.as_deref()),
            bookings::requester_id.eq(&booking.requester.requester_id),
            bookings::requester_name.eq(&booking.requester.name),
            bookings::requester_email.eq(&booking.requester.email),
            bookings::status.eq(booking.status.as_str()),
            bookings::status_reason.eq(booking.status_reason.as_deref()),
            bookings::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let booking_id: i64 = conn.get_last_insert_rowid()?;

    info!(
        booking_id,
        resource_key = %booking.resource_key,
        booking_date = %booking_date,
        "Booking created"
    );

    Ok(booking_id)
}

/// Writes a booking's status, reason, and reviewer.
///
/// The row is only updated while its stored status still equals `expected`.
/// A review computed from a stale read never overwrites a newer decision.
///
/// # Errors
///
/// Returns `BookingNotFound` if the booking does not exist, `StatusChanged`
/// if its stored status no longer matches `expected`, or a database error.
pub fn update_booking_status(
    conn: &mut SqliteConnection,
    booking: &Booking,
    expected: BookingStatus,
    reviewed_at: &str,
) -> Result<(), PersistenceError> {
    let booking_id: i64 = booking
        .booking_id
        .ok_or_else(|| PersistenceError::NotFound(String::from("Booking has no ID")))?;

    let rows_affected: usize = diesel::update(bookings::table)
        .filter(bookings::booking_id.eq(booking_id))
        .filter(bookings::status.eq(expected.as_str()))
        .set((
            bookings::status.eq(booking.status.as_str()),
            bookings::status_reason.eq(booking.status_reason.as_deref()),
            bookings::reviewed_by.eq(booking.reviewed_by.as_deref()),
            bookings::reviewed_at.eq(reviewed_at),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        if booking_exists(conn, booking_id)? {
            return Err(PersistenceError::StatusChanged { booking_id });
        }
        return Err(PersistenceError::BookingNotFound(booking_id));
    }

    debug!(booking_id, status = %booking.status, "Booking status updated");
    Ok(())
}
