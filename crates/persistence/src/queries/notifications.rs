// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::NotificationData;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Diesel Queryable struct for notification rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = notifications)]
struct NotificationRow {
    notification_id: i64,
    user_id: String,
    booking_id: Option<i64>,
    title: String,
    message: String,
    kind: String,
    is_read: i32,
    created_at: String,
}

impl From<NotificationRow> for NotificationData {
    fn from(row: NotificationRow) -> Self {
        Self {
            notification_id: row.notification_id,
            user_id: row.user_id,
            booking_id: row.booking_id,
            title: row.title,
            message: row.message,
            kind: row.kind,
            is_read: row.is_read != 0,
            created_at: row.created_at,
        }
    }
}

/// Lists a user's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_notifications(
    conn: &mut SqliteConnection,
    user_id: &str,
    unread_only: bool,
) -> Result<Vec<NotificationData>, PersistenceError> {
    let mut query = notifications::table
        .filter(notifications::user_id.eq(user_id))
        .into_boxed();
    if unread_only {
        query = query.filter(notifications::is_read.eq(0));
    }

    let rows: Vec<NotificationRow> = query
        .order(notifications::notification_id.desc())
        .select(NotificationRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(NotificationData::from).collect())
}
