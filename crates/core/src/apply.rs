// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::notification::Notification;
use crate::state::{State, TransitionResult};
use campus_book_audit::{Action, Actor, AuditEvent, BookingAction, Cause, StateSnapshot};
use campus_book_domain::{
    Booking, BookingStatus, CatalogResource, ConflictReport, ResourceCatalog, ResourceKey, SlotCalendar,
    describe_slots, find_conflicts_for_key, validate_submission,
};

/// Applies a command to the booking snapshot, producing the booking to store
/// and its audit event.
///
/// # Arguments
///
/// * `state` - The booking snapshot (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `calendar` - The slot vocabulary
/// * `catalog` - The resource and department catalog
///
/// # Errors
///
/// Returns an error if:
/// - The draft or its details violate a domain rule
/// - The draft collides with an active booking in the snapshot
/// - The targeted booking is not in the snapshot
/// - The lifecycle refuses the status change
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
    calendar: &SlotCalendar,
    catalog: &ResourceCatalog,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::SubmitBooking {
            draft,
            details,
            requester,
        } => {
            let (key, resource): (ResourceKey, &CatalogResource) =
                validate_submission(&draft, &details, &requester, calendar, catalog)?;

            let report: ConflictReport = find_conflicts_for_key(&key, &draft, &state.bookings);
            if !report.is_clear() {
                return Err(CoreError::ConflictDetected(report));
            }

            let booking: Booking = Booking::new(draft, details, requester, &resource.name)?;

            let when: String = describe_slots(calendar, booking.slots(), booking.draft.duration_mode)?;
            let action: Action = Action::booking(
                BookingAction::Submit,
                Some(format!(
                    "Requested {} on {} ({when})",
                    booking.resource_name,
                    booking.booking_date()
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                None,
                actor,
                cause,
                action,
                StateSnapshot::absent(),
                StateSnapshot::of_booking(&booking),
            );

            Ok(TransitionResult {
                booking,
                previous_status: None,
                audit_event,
                notification: None,
            })
        }
        Command::ApproveBooking { booking_id } => review(
            state,
            booking_id,
            BookingStatus::Approved,
            BookingAction::Approve,
            None,
            actor,
            cause,
            calendar,
        ),
        Command::RejectBooking { booking_id, reason } => review(
            state,
            booking_id,
            BookingStatus::Rejected,
            BookingAction::Reject,
            Some(reason),
            actor,
            cause,
            calendar,
        ),
        Command::CancelBooking { booking_id, reason } => review(
            state,
            booking_id,
            BookingStatus::Cancelled,
            BookingAction::Cancel,
            Some(reason),
            actor,
            cause,
            calendar,
        ),
    }
}

#[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
fn review(
    state: &State,
    booking_id: i64,
    target: BookingStatus,
    action_kind: BookingAction,
    reason: Option<String>,
    actor: Actor,
    cause: Cause,
    calendar: &SlotCalendar,
) -> Result<TransitionResult, CoreError> {
    let current: &Booking = state
        .find(booking_id)
        .ok_or(CoreError::BookingNotFound(booking_id))?;

    let updated: Booking = current.transition(target, reason.as_deref(), &actor.id)?;

    let action: Action = Action::booking(action_kind, updated.status_reason.clone());

    let audit_event: AuditEvent = AuditEvent::new(
        Some(booking_id),
        actor,
        cause,
        action,
        StateSnapshot::of_booking(current),
        StateSnapshot::of_booking(&updated),
    );

    let notification: Notification = Notification::for_transition(&updated, calendar);

    Ok(TransitionResult {
        booking: updated,
        previous_status: Some(current.status),
        audit_event,
        notification: Some(notification),
    })
}
