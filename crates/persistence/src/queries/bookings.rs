// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.
//!
//! Every query returns fully reconstructed domain bookings. Rows that no
//! longer parse (bad slot JSON, unknown status) surface as
//! `ReconstructionError` rather than being skipped.

use std::str::FromStr;

use campus_book_domain::{
    Booking, BookingDetails, BookingDraft, BookingStatus, DurationMode, Requester, ResourceKey,
    ResourceRef, ResourceType, SlotSet, format_booking_date,
};
use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use num_traits::ToPrimitive;
use time::Date;
use time::format_description::well_known::Iso8601;
use tracing::debug;

use crate::data_models::parse_timestamp;
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;

/// Diesel Queryable struct for booking rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = bookings)]
struct BookingRow {
    booking_id: i64,
    resource_type: String,
    resource_id: Option<String>,
    sub_area: Option<String>,
    resource_key: String,
    resource_name: String,
    booking_date: String,
    slots_json: String,
    duration_mode: String,
    event_title: String,
    event_description: String,
    attendees: i32,
    department_category: String,
    department: String,
    faculty_incharge: Option<String>,
    contact_number: Option<String>,
    contact_email: Option<String>,
    requester_id: String,
    requester_name: String,
    requester_email: String,
    status: String,
    status_reason: Option<String>,
    reviewed_by: Option<String>,
    reviewed_at: Option<String>,
    created_at: String,
}

impl BookingRow {
    fn into_booking(self) -> Result<Booking, PersistenceError> {
        let booking_date: Date = Date::parse(&self.booking_date, &Iso8601::DATE).map_err(|e| {
            PersistenceError::ReconstructionError(format!(
                "Invalid booking date '{}': {e}",
                self.booking_date
            ))
        })?;
        let slots: SlotSet = serde_json::from_str(&self.slots_json)?;
        let attendees: u32 = self.attendees.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "Attendee count out of range: {}",
                self.attendees
            ))
        })?;

        let draft: BookingDraft = BookingDraft {
            resource: ResourceRef {
                resource_type: ResourceType::from_str(&self.resource_type)?,
                resource_id: self.resource_id,
                sub_area: self.sub_area,
            },
            booking_date,
            slots,
            duration_mode: DurationMode::from_str(&self.duration_mode)?,
        };

        Ok(Booking {
            booking_id: Some(self.booking_id),
            resource_key: ResourceKey::parse(&self.resource_key)?,
            resource_name: self.resource_name,
            draft,
            details: BookingDetails {
                event_title: self.event_title,
                event_description: self.event_description,
                attendees,
                department_category: self.department_category,
                department: self.department,
                faculty_incharge: self.faculty_incharge,
                contact_number: self.contact_number,
                contact_email: self.contact_email,
            },
            requester: Requester {
                requester_id: self.requester_id,
                name: self.requester_name,
                email: self.requester_email,
            },
            status: BookingStatus::from_str(&self.status)?,
            status_reason: self.status_reason,
            reviewed_by: self.reviewed_by,
            reviewed_at: self.reviewed_at.as_deref().map(parse_timestamp).transpose()?,
            created_at: Some(parse_timestamp(&self.created_at)?),
        })
    }
}

fn into_bookings(rows: Vec<BookingRow>) -> Result<Vec<Booking>, PersistenceError> {
    rows.into_iter().map(BookingRow::into_booking).collect()
}

/// Retrieves a booking by ID.
///
/// # Errors
///
/// Returns `BookingNotFound` if no such booking exists, or an error if the
/// row cannot be reconstructed.
pub fn get_booking(conn: &mut SqliteConnection, booking_id: i64) -> Result<Booking, PersistenceError> {
    let row: Option<BookingRow> = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .select(BookingRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or(PersistenceError::BookingNotFound(booking_id))?
        .into_booking()
}

/// Lists every booking, ordered by date then ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_bookings(conn: &mut SqliteConnection) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .order((bookings::booking_date.asc(), bookings::booking_id.asc()))
        .select(BookingRow::as_select())
        .load(conn)?;
    into_bookings(rows)
}

/// Lists every booking for one resource key, in any status.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_bookings_for_resource(
    conn: &mut SqliteConnection,
    key: &ResourceKey,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::resource_key.eq(key.as_str()))
        .order((bookings::booking_date.asc(), bookings::booking_id.asc()))
        .select(BookingRow::as_select())
        .load(conn)?;
    debug!(resource_key = %key, count = rows.len(), "Loaded bookings for resource");
    into_bookings(rows)
}

/// Lists the bookings a requester submitted, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_bookings_for_requester(
    conn: &mut SqliteConnection,
    requester_id: &str,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::requester_id.eq(requester_id))
        .order(bookings::booking_id.desc())
        .select(BookingRow::as_select())
        .load(conn)?;
    into_bookings(rows)
}

/// Lists every booking on one calendar date, across all resources.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_bookings_for_date(
    conn: &mut SqliteConnection,
    booking_date: Date,
) -> Result<Vec<Booking>, PersistenceError> {
    let date_text: String = format_booking_date(booking_date)?;
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::booking_date.eq(&date_text))
        .order(bookings::booking_id.asc())
        .select(BookingRow::as_select())
        .load(conn)?;
    into_bookings(rows)
}

/// Most text matches a search returns.
pub const SEARCH_LIMIT: i64 = 20;
/// Most ID-prefix matches a search returns.
pub const ID_SEARCH_LIMIT: i64 = 5;

/// Searches bookings by event title, resource name, requester name, or ID
/// prefix, newest booking date first.
///
/// Text matching is a case-insensitive substring match. The ID prefix is
/// only tried when the query is all digits. With `requester_id` set, only
/// that requester's bookings are searched.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn search_bookings(
    conn: &mut SqliteConnection,
    query: &str,
    requester_id: Option<&str>,
) -> Result<Vec<Booking>, PersistenceError> {
    let query: &str = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let pattern: String = format!("%{}%", escape_like(query));
    let mut text_query = bookings::table
        .filter(
            bookings::event_title
                .like(pattern.clone())
                .escape('\\')
                .or(bookings::resource_name.like(pattern.clone()).escape('\\'))
                .or(bookings::requester_name.like(pattern).escape('\\')),
        )
        .into_boxed();
    if let Some(requester_id) = requester_id {
        text_query = text_query.filter(bookings::requester_id.eq(requester_id));
    }
    let mut rows: Vec<BookingRow> = text_query
        .order((bookings::booking_date.desc(), bookings::booking_id.desc()))
        .limit(SEARCH_LIMIT)
        .select(BookingRow::as_select())
        .load(conn)?;

    if query.chars().all(|c| c.is_ascii_digit()) {
        let mut id_query = bookings::table
            .filter(
                sql::<Bool>("CAST(booking_id AS TEXT) LIKE ")
                    .bind::<Text, _>(format!("{query}%")),
            )
            .into_boxed();
        if let Some(requester_id) = requester_id {
            id_query = id_query.filter(bookings::requester_id.eq(requester_id));
        }
        let id_rows: Vec<BookingRow> = id_query
            .order(bookings::booking_id.asc())
            .limit(ID_SEARCH_LIMIT)
            .select(BookingRow::as_select())
            .load(conn)?;
        for row in id_rows {
            if !rows.iter().any(|r| r.booking_id == row.booking_id) {
                rows.push(row);
            }
        }
    }

    // Dates are stored as YYYY-MM-DD, so text order is date order.
    rows.sort_by(|a, b| {
        b.booking_date
            .cmp(&a.booking_date)
            .then(b.booking_id.cmp(&a.booking_id))
    });
    debug!(query, count = rows.len(), "Searched bookings");
    into_bookings(rows)
}

fn escape_like(text: &str) -> String {
    let mut escaped: String = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Returns true if a booking with this ID exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn booking_exists(conn: &mut SqliteConnection, booking_id: i64) -> Result<bool, PersistenceError> {
    let count: i64 = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
