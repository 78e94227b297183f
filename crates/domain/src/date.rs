// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking date handling.
//!
//! Bookings are compared by calendar date only. Clients may send either a
//! plain `YYYY-MM-DD` date or a full RFC 3339 timestamp; timestamps are
//! converted to the campus time zone before the date is taken, so a booking
//! made at `2025-03-09T20:00:00Z` lands on `2025-03-10` in `Asia/Kolkata`.

use crate::error::DomainError;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;
use time::Date;
use time::format_description::well_known::Iso8601;

/// Default campus time zone.
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// Parses an IANA time zone name.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` for unknown names.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Parses a booking date, normalizing timestamps to the campus date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the value is neither a
/// `YYYY-MM-DD` date nor an RFC 3339 timestamp.
pub fn parse_booking_date(value: &str, tz: Tz) -> Result<Date, DomainError> {
    let value: &str = value.trim();

    if let Ok(naive) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return naive_to_date(naive, value);
    }

    match DateTime::<FixedOffset>::parse_from_rfc3339(value) {
        Ok(timestamp) => naive_to_date(timestamp.with_timezone(&tz).date_naive(), value),
        Err(e) => Err(DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }),
    }
}

/// The campus calendar date at an instant.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the date is outside the range
/// booking dates can represent.
pub fn campus_date(instant: DateTime<Utc>, tz: Tz) -> Result<Date, DomainError> {
    naive_to_date(instant.with_timezone(&tz).date_naive(), &instant.to_rfc3339())
}

/// Today's date on campus.
///
/// # Errors
///
/// See [`campus_date`].
pub fn today_in(tz: Tz) -> Result<Date, DomainError> {
    campus_date(Utc::now(), tz)
}

/// Formats a booking date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the year cannot be formatted.
pub fn format_booking_date(date: Date) -> Result<String, DomainError> {
    date.format(&Iso8601::DATE)
        .map_err(|e| DomainError::DateParseError {
            date_string: date.to_string(),
            error: e.to_string(),
        })
}

fn naive_to_date(naive: NaiveDate, source: &str) -> Result<Date, DomainError> {
    let invalid = |error: String| DomainError::DateParseError {
        date_string: source.to_string(),
        error,
    };

    let month_number: u8 = u8::try_from(naive.month()).map_err(|e| invalid(e.to_string()))?;
    let day: u8 = u8::try_from(naive.day()).map_err(|e| invalid(e.to_string()))?;
    let month: time::Month = time::Month::try_from(month_number).map_err(|e| invalid(e.to_string()))?;

    Date::from_calendar_date(naive.year(), month, day).map_err(|e| invalid(e.to_string()))
}
