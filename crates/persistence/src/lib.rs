// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Campus Book.
//!
//! This crate stores bookings, their audit trail, and requester
//! notifications in `SQLite` through Diesel. It is the only place booking
//! rows are created or changed.
//!
//! ## Schema
//!
//! Migrations are embedded and applied on open:
//!
//! - `bookings` — one row per request, slot sets stored as JSON text
//! - `audit_events` — one row per submission or status change
//! - `notifications` — in-app messages for requesters
//!
//! Foreign key enforcement is verified at startup. File databases run in
//! WAL mode.
//!
//! ## Testing
//!
//! `new_in_memory()` opens an isolated shared-cache in-memory database, so
//! tests never touch the filesystem.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;
use tracing::info;

use campus_book::{BookingStore, TransitionResult};
use campus_book_audit::AuditEvent;
use campus_book_domain::{Booking, ResourceKey};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::NotificationData;
pub use error::PersistenceError;
pub use mutations::PersistTransitionResult;

use backend::PersistenceBackend;

/// The booking tables every migrated database must contain.
pub const EXPECTED_TABLES: [&str; 3] = ["audit_events", "bookings", "notifications"];

/// Persistence adapter for bookings, audit events, and notifications.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_booking_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        info!(path = path_str, "Opened booking database");
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Lists the user tables present in the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails.
    pub fn list_tables(&mut self) -> Result<Vec<String>, PersistenceError> {
        backend::sqlite::list_tables(&mut self.conn)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Persists a transition result: the booking, its audit event, and the
    /// requester notification for review transitions.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails. Nothing is stored in that case.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    // ========================================================================
    // Booking Queries
    // ========================================================================

    /// Retrieves a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns `BookingNotFound` if no such booking exists.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Booking, PersistenceError> {
        queries::get_booking(&mut self.conn, booking_id)
    }

    /// Lists every booking, ordered by date then ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings(&mut self) -> Result<Vec<Booking>, PersistenceError> {
        queries::list_bookings(&mut self.conn)
    }

    /// Lists every booking for one resource key, in any status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_resource(
        &mut self,
        key: &ResourceKey,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::list_bookings_for_resource(&mut self.conn, key)
    }

    /// Lists a requester's bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_requester(
        &mut self,
        requester_id: &str,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::list_bookings_for_requester(&mut self.conn, requester_id)
    }

    /// Searches bookings by event title, resource name, requester name, or
    /// ID prefix, newest booking date first.
    ///
    /// With `requester_id` set, only that requester's bookings match.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search_bookings(
        &mut self,
        query: &str,
        requester_id: Option<&str>,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::search_bookings(&mut self.conn, query, requester_id)
    }

    /// Lists every booking on a date, across all resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings_for_date(
        &mut self,
        booking_date: Date,
    ) -> Result<Vec<Booking>, PersistenceError> {
        queries::list_bookings_for_date(&mut self.conn, booking_date)
    }

    // ========================================================================
    // Audit Event Queries
    // ========================================================================

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the audit timeline of a booking, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be deserialized.
    pub fn get_audit_timeline(
        &mut self,
        booking_id: i64,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_timeline(&mut self.conn, booking_id)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Lists a user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_notifications(
        &mut self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<NotificationData>, PersistenceError> {
        queries::list_notifications(&mut self.conn, user_id, unread_only)
    }

    /// Marks one of a user's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns `NotificationNotFound` if it does not exist or belongs to
    /// another user.
    pub fn mark_notification_read(
        &mut self,
        notification_id: i64,
        user_id: &str,
    ) -> Result<(), PersistenceError> {
        mutations::mark_notification_read(&mut self.conn, notification_id, user_id)
    }
}

impl BookingStore for Persistence {
    type Error = PersistenceError;

    fn bookings_for_resource(&mut self, key: &ResourceKey) -> Result<Vec<Booking>, Self::Error> {
        self.list_bookings_for_resource(key)
    }

    fn store_transition(&mut self, result: &TransitionResult) -> Result<Booking, Self::Error> {
        self.persist_transition(result).map(|persisted| persisted.booking)
    }
}
