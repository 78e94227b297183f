// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbound notification delivery.
//!
//! The in-app notification row is written by the persistence layer in the
//! same transaction as the review. This sender covers the outbound side
//! (email in a full deployment) by emitting one structured log line per
//! notification.

use campus_book::{Notification, NotificationSender};
use tracing::info;

/// Delivers notifications as structured log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSender for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        info!(
            recipient = notification.recipient_id(),
            email = %notification.booking.requester.email,
            booking_id = notification.booking.booking_id,
            status = %notification.status,
            kind = notification.kind.as_str(),
            reason = notification.reason.as_deref().unwrap_or(""),
            title = %notification.title,
            "Booking notification"
        );
    }
}
