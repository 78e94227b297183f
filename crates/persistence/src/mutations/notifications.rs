// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use campus_book::Notification;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Records an in-app notification for the booking's requester.
///
/// # Returns
///
/// The notification ID assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_notification(
    conn: &mut SqliteConnection,
    notification: &Notification,
    booking_id: i64,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(notifications::table)
        .values((
            notifications::user_id.eq(notification.recipient_id()),
            notifications::booking_id.eq(Some(booking_id)),
            notifications::title.eq(&notification.title),
            notifications::message.eq(&notification.message),
            notifications::kind.eq(notification.kind.as_str()),
            notifications::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let notification_id: i64 = conn.get_last_insert_rowid()?;
    debug!(
        notification_id,
        booking_id,
        user_id = notification.recipient_id(),
        "Recorded notification"
    );
    Ok(notification_id)
}

/// Marks one of a user's notifications as read.
///
/// # Errors
///
/// Returns `NotificationNotFound` if the notification does not exist or
/// belongs to another user.
pub fn mark_notification_read(
    conn: &mut SqliteConnection,
    notification_id: i64,
    user_id: &str,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(notifications::table)
        .filter(notifications::notification_id.eq(notification_id))
        .filter(notifications::user_id.eq(user_id))
        .set(notifications::is_read.eq(1))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotificationNotFound(notification_id));
    }
    Ok(())
}
