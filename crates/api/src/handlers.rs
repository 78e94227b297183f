// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use std::collections::BTreeMap;

use campus_book::{Command, Notification, State, TransitionResult, apply, check_draft};
use campus_book_audit::{Actor, AuditEvent, Cause};
use campus_book_domain::{
    Booking, BookingDraft, BookingStatus, CalendarViewer, CalendarVisibility, ConflictReport,
    ResourceCatalog, ResourceKey, ResourceType, Requester, SlotCalendar, Tz, describe_slots,
    format_booking_date, parse_booking_date,
};
use campus_book_persistence::{NotificationData, Persistence, PersistTransitionResult};
use time::Date;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::capabilities::compute_booking_capabilities;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AuditEventInfo, AuditTimelineResponse, BookingDraftRequest, BookingInfo, CalendarEntryInfo,
    CalendarResponse, CheckConflictsResponse, ConflictInfo, DepartmentCategoryInfo,
    DashboardResponse, GetBookingResponse, ListBookingsResponse, ListNotificationsResponse,
    NotificationInfo, ResourceInfo, ResourceUsageInfo, ResourcesResponse, ReviewBookingRequest,
    ReviewBookingResponse, SearchResponse, SlotInfo, SlotsResponse, SubmitBookingRequest,
    SubmitBookingResponse,
};

/// Configuration every handler reads: the slot calendar, the resource
/// catalog, the campus time zone, and the calendar visibility policy.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct BookingContext {
    /// The business-day slot vocabulary.
    pub calendar: SlotCalendar,
    /// Bookable resources and departments.
    pub catalog: ResourceCatalog,
    /// Time zone used to normalize timestamp-form booking dates.
    pub timezone: Tz,
    /// Which bookings non-admins see on the calendar.
    pub visibility: CalendarVisibility,
}

impl BookingContext {
    /// Creates a context from its parts.
    #[must_use]
    pub const fn new(
        calendar: SlotCalendar,
        catalog: ResourceCatalog,
        timezone: Tz,
        visibility: CalendarVisibility,
    ) -> Self {
        Self {
            calendar,
            catalog,
            timezone,
            visibility,
        }
    }
}

/// The result of an API operation that includes both the response and the audit event.
///
/// This ensures that successful API operations always produce an audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation, with its stored IDs.
    pub audit_event: AuditEvent,
    /// The requester notification, for review transitions.
    pub notification: Option<Notification>,
}

// ========================================================================
// Slots and catalog
// ========================================================================

/// Lists the bookable slots of the business day.
///
/// This is a read-only operation that requires no authorization.
#[must_use]
pub fn list_slots(context: &BookingContext) -> SlotsResponse {
    SlotsResponse {
        slots: context
            .calendar
            .full_day_slots()
            .iter()
            .map(|slot| SlotInfo {
                start: slot.label(),
                end: slot.end_label(),
            })
            .collect(),
        full_day_label: context.calendar.full_day_label(),
    }
}

/// Lists the resource catalog and the department catalog.
///
/// This is a read-only operation that requires no authorization.
///
/// # Errors
///
/// Returns an error if a catalog entry has no valid resource key.
pub fn list_resources(context: &BookingContext) -> Result<ResourcesResponse, ApiError> {
    let resources: Vec<ResourceInfo> = context
        .catalog
        .resources()
        .iter()
        .map(ResourceInfo::from_resource)
        .collect::<Result<_, _>>()
        .map_err(translate_domain_error)?;

    Ok(ResourcesResponse {
        resources,
        department_categories: context
            .catalog
            .department_categories()
            .iter()
            .map(DepartmentCategoryInfo::from)
            .collect(),
    })
}

// ========================================================================
// Conflict checks and submission
// ========================================================================

/// Runs the conflict check for a draft against the stored bookings of its
/// resource.
///
/// Malformed drafts (no slots, slots outside the day, unknown resource) are
/// rejected before any bookings are read.
///
/// # Errors
///
/// Returns an error if:
/// - The draft is malformed or names an unknown resource
/// - The stored bookings cannot be read
pub fn check_conflicts(
    persistence: &mut Persistence,
    context: &BookingContext,
    request: &BookingDraftRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CheckConflictsResponse, ApiError> {
    let draft: BookingDraft = request
        .to_draft(&context.calendar, context.timezone)
        .map_err(translate_domain_error)?;
    let key: ResourceKey = draft
        .validate(&context.calendar)
        .map_err(translate_domain_error)?;
    context
        .catalog
        .lookup(&key)
        .map_err(translate_domain_error)?;

    let snapshot: Vec<Booking> = persistence
        .list_bookings_for_resource(&key)
        .map_err(translate_persistence_error)?;
    let state: State = State::from_bookings(snapshot);

    let report: ConflictReport =
        check_draft(&context.calendar, &draft, &state).map_err(translate_domain_error)?;

    debug!(
        actor = %authenticated_actor.id,
        resource_key = %key,
        conflicts = report.len(),
        "Checked draft for conflicts"
    );

    Ok(CheckConflictsResponse {
        resource_key: key.as_str().to_string(),
        booking_date: render_date(draft.booking_date)?,
        available: report.is_clear(),
        conflicts: report
            .in_display_order()
            .iter()
            .map(ConflictInfo::from_entry)
            .collect(),
    })
}

/// Submits a booking request in the caller's name.
///
/// This function:
/// - Parses the draft and event details
/// - Reads the resource's stored bookings
/// - Applies the submit command, which validates and checks for conflicts
/// - Persists the new `Pending` booking with its audit event
///
/// The caller must hold exclusive access to `persistence` for the whole
/// call so no other submission lands between the check and the insert.
///
/// # Errors
///
/// Returns an error if:
/// - Any field is invalid or the resource is unknown
/// - The requested slots collide with an active booking
/// - Persistence fails
pub fn submit_booking(
    persistence: &mut Persistence,
    context: &BookingContext,
    request: &SubmitBookingRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<SubmitBookingResponse>, ApiError> {
    let draft: BookingDraft = request
        .draft
        .to_draft(&context.calendar, context.timezone)
        .map_err(translate_domain_error)?;
    let key: ResourceKey = draft.resource_key().map_err(translate_domain_error)?;

    let snapshot: Vec<Booking> = persistence
        .list_bookings_for_resource(&key)
        .map_err(translate_persistence_error)?;
    let state: State = State::from_bookings(snapshot);

    let requester: Requester = Requester {
        requester_id: authenticated_actor.id.clone(),
        name: request.requester_name.clone(),
        email: request.requester_email.clone(),
    };
    let command: Command = Command::SubmitBooking {
        draft,
        details: request.details(),
        requester,
    };

    let actor: Actor = authenticated_actor.to_audit_actor();
    let transition: TransitionResult = apply(
        &state,
        command,
        actor,
        cause,
        &context.calendar,
        &context.catalog,
    )
    .map_err(translate_core_error)?;

    let stored: PersistTransitionResult = persistence
        .persist_transition(&transition)
        .map_err(translate_persistence_error)?;

    info!(
        booking_id = stored.booking.booking_id,
        resource_key = %stored.booking.resource_key,
        requester = %stored.booking.requester.requester_id,
        "Booking submitted"
    );

    let booking: BookingInfo = booking_info(&stored.booking, context)?;
    let message: String = format!(
        "Booking '{}' for {} on {} is pending review",
        booking.event_title, booking.resource_name, booking.booking_date
    );
    let audit_event: AuditEvent = stored_event(&transition, &stored);

    Ok(ApiResult {
        response: SubmitBookingResponse { booking, message },
        audit_event,
        notification: None,
    })
}

// ========================================================================
// Review
// ========================================================================

/// Approves a pending booking.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The booking does not exist
/// - The booking is not `Pending`
/// - Persistence fails, or another reviewer changed the booking first
pub fn approve_booking(
    persistence: &mut Persistence,
    context: &BookingContext,
    booking_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<ReviewBookingResponse>, ApiError> {
    AuthorizationService::authorize_review(authenticated_actor, "approve_booking")?;
    review_booking(
        persistence,
        context,
        Command::ApproveBooking { booking_id },
        authenticated_actor,
        cause,
    )
}

/// Rejects a pending booking. A reason is required.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The reason is missing or blank
/// - The booking does not exist or is not `Pending`
/// - Persistence fails, or another reviewer changed the booking first
pub fn reject_booking(
    persistence: &mut Persistence,
    context: &BookingContext,
    booking_id: i64,
    request: ReviewBookingRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<ReviewBookingResponse>, ApiError> {
    AuthorizationService::authorize_review(authenticated_actor, "reject_booking")?;
    review_booking(
        persistence,
        context,
        Command::RejectBooking {
            booking_id,
            reason: request.reason.unwrap_or_default(),
        },
        authenticated_actor,
        cause,
    )
}

/// Cancels a pending or approved booking. A reason is required.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The reason is missing or blank
/// - The booking does not exist or is already closed
/// - Persistence fails, or another reviewer changed the booking first
pub fn cancel_booking(
    persistence: &mut Persistence,
    context: &BookingContext,
    booking_id: i64,
    request: ReviewBookingRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<ReviewBookingResponse>, ApiError> {
    AuthorizationService::authorize_review(authenticated_actor, "cancel_booking")?;
    review_booking(
        persistence,
        context,
        Command::CancelBooking {
            booking_id,
            reason: request.reason.unwrap_or_default(),
        },
        authenticated_actor,
        cause,
    )
}

fn review_booking(
    persistence: &mut Persistence,
    context: &BookingContext,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ApiResult<ReviewBookingResponse>, ApiError> {
    let booking_id: i64 = command.target_booking_id().ok_or_else(|| ApiError::Internal {
        message: String::from("Review command has no target booking"),
    })?;
    let current: Booking = persistence
        .get_booking(booking_id)
        .map_err(translate_persistence_error)?;
    let previous_status: BookingStatus = current.status;
    let state: State = State::from_bookings(vec![current]);

    let actor: Actor = authenticated_actor.to_audit_actor();
    let transition: TransitionResult = apply(
        &state,
        command,
        actor,
        cause,
        &context.calendar,
        &context.catalog,
    )
    .map_err(translate_core_error)?;

    let stored: PersistTransitionResult = persistence
        .persist_transition(&transition)
        .map_err(translate_persistence_error)?;

    info!(
        booking_id,
        from = %previous_status,
        to = %stored.booking.status,
        reviewer = %authenticated_actor.id,
        "Booking reviewed"
    );

    let booking: BookingInfo = booking_info(&stored.booking, context)?;
    let message: String = format!(
        "Booking {booking_id} moved from {previous_status} to {}",
        stored.booking.status
    );
    let audit_event: AuditEvent = stored_event(&transition, &stored);

    Ok(ApiResult {
        response: ReviewBookingResponse {
            booking,
            previous_status: previous_status.as_str().to_string(),
            notification_id: stored.notification_id,
            message,
        },
        audit_event,
        notification: transition.notification,
    })
}

// ========================================================================
// Reads
// ========================================================================

/// Fetches one booking with the caller's capabilities on it.
///
/// # Errors
///
/// Returns an error if:
/// - The booking does not exist
/// - The caller is a requester who does not own the booking
pub fn get_booking(
    persistence: &mut Persistence,
    context: &BookingContext,
    booking_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<GetBookingResponse, ApiError> {
    let booking: Booking = persistence
        .get_booking(booking_id)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_view_booking(authenticated_actor, &booking)?;

    Ok(GetBookingResponse {
        booking: booking_info(&booking, context)?,
        capabilities: compute_booking_capabilities(authenticated_actor, &booking),
    })
}

/// Lists bookings.
///
/// Admins see every booking unless they filter by requester. Requesters
/// see their own bookings, newest first.
///
/// # Errors
///
/// Returns an error if:
/// - A requester asks for someone else's bookings
/// - The query fails
pub fn list_bookings(
    persistence: &mut Persistence,
    context: &BookingContext,
    requester_filter: Option<&str>,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListBookingsResponse, ApiError> {
    let bookings: Vec<Booking> = match requester_filter {
        Some(requester_id) => {
            AuthorizationService::authorize_list_for(authenticated_actor, requester_id)?;
            persistence.list_bookings_for_requester(requester_id)
        }
        None if authenticated_actor.is_admin() => persistence.list_bookings(),
        None => persistence.list_bookings_for_requester(&authenticated_actor.id),
    }
    .map_err(translate_persistence_error)?;

    let bookings: Vec<BookingInfo> = bookings
        .iter()
        .map(|b| booking_info(b, context))
        .collect::<Result<_, _>>()?;

    Ok(ListBookingsResponse { bookings })
}

/// Shows the bookings on one date under the visibility policy.
///
/// Anonymous callers are allowed and see only what the policy shows to
/// everyone. Admins see every booking.
///
/// # Errors
///
/// Returns an error if the date cannot be parsed or the query fails.
pub fn calendar_view(
    persistence: &mut Persistence,
    context: &BookingContext,
    booking_date: &str,
    authenticated_actor: Option<&AuthenticatedActor>,
) -> Result<CalendarResponse, ApiError> {
    let date: Date =
        parse_booking_date(booking_date, context.timezone).map_err(translate_domain_error)?;
    let bookings: Vec<Booking> = persistence
        .list_bookings_for_date(date)
        .map_err(translate_persistence_error)?;

    let viewer: CalendarViewer =
        authenticated_actor.map_or_else(CalendarViewer::anonymous, AuthenticatedActor::to_viewer);

    let entries: Vec<CalendarEntryInfo> = context
        .visibility
        .calendar_for_date(&bookings, date, &viewer)
        .into_iter()
        .map(|booking| {
            Ok(CalendarEntryInfo {
                booking_id: booking.booking_id,
                resource_key: booking.resource_key.as_str().to_string(),
                resource_name: booking.resource_name.clone(),
                time_label: describe_slots(
                    &context.calendar,
                    booking.slots(),
                    booking.draft.duration_mode,
                )
                .map_err(translate_domain_error)?,
                slots: booking.slots().labels(),
                event_title: booking.details.event_title.clone(),
                department: booking.details.department.clone(),
                status: booking.status.as_str().to_string(),
                is_own: viewer
                    .user_id
                    .as_deref()
                    .is_some_and(|id| id == booking.requester.requester_id),
            })
        })
        .collect::<Result<_, ApiError>>()?;

    Ok(CalendarResponse {
        booking_date: render_date(date)?,
        visibility: context.visibility.as_str().to_string(),
        entries,
    })
}

/// Returns the audit timeline of a booking, oldest first.
///
/// # Errors
///
/// Returns an error if:
/// - The booking does not exist
/// - The caller is a requester who does not own the booking
/// - The query fails
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    booking_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<AuditTimelineResponse, ApiError> {
    let booking: Booking = persistence
        .get_booking(booking_id)
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_view_booking(authenticated_actor, &booking)?;

    let events: Vec<AuditEvent> = persistence
        .get_audit_timeline(booking_id)
        .map_err(translate_persistence_error)?;

    Ok(AuditTimelineResponse {
        booking_id,
        events: events.iter().map(AuditEventInfo::from).collect(),
    })
}

// ========================================================================
// Search and dashboard
// ========================================================================

/// Number of bookings the dashboard lists as recent activity.
const RECENT_ACTIVITY_LIMIT: usize = 3;

/// Searches the catalog and the caller's visible bookings.
///
/// Admins search every booking; requesters search only their own.
///
/// # Errors
///
/// Returns an error if:
/// - The query is blank
/// - The search query fails
pub fn search(
    persistence: &mut Persistence,
    context: &BookingContext,
    query: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<SearchResponse, ApiError> {
    let query: &str = query.trim();
    if query.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("q"),
            message: String::from("Search query must not be empty"),
        });
    }

    let resources: Vec<ResourceInfo> = context
        .catalog
        .search(query)
        .into_iter()
        .map(ResourceInfo::from_resource)
        .collect::<Result<_, _>>()
        .map_err(translate_domain_error)?;

    let scope: Option<&str> = if authenticated_actor.is_admin() {
        None
    } else {
        Some(authenticated_actor.id.as_str())
    };
    let bookings: Vec<BookingInfo> = persistence
        .search_bookings(query, scope)
        .map_err(translate_persistence_error)?
        .iter()
        .map(|b| booking_info(b, context))
        .collect::<Result<_, _>>()?;

    debug!(
        actor = %authenticated_actor.id,
        query,
        resources = resources.len(),
        bookings = bookings.len(),
        "Searched"
    );

    Ok(SearchResponse {
        query: query.to_string(),
        resources,
        bookings,
    })
}

/// Summarizes the caller's bookings as of `today`.
///
/// Admins see figures over every booking; requesters over their own.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn dashboard(
    persistence: &mut Persistence,
    context: &BookingContext,
    today: Date,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DashboardResponse, ApiError> {
    let mut bookings: Vec<Booking> = if authenticated_actor.is_admin() {
        persistence.list_bookings()
    } else {
        persistence.list_bookings_for_requester(&authenticated_actor.id)
    }
    .map_err(translate_persistence_error)?;

    let upcoming_events: usize = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Approved && b.booking_date() >= today)
        .count();
    let pending_requests: usize = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Pending)
        .count();
    let active_resources: usize = context.catalog.resources_of_type(ResourceType::Venue).count()
        + context.catalog.resources_of_type(ResourceType::Bus).count();

    let mut usage: BTreeMap<&str, usize> = BTreeMap::new();
    for booking in &bookings {
        *usage.entry(booking.resource_name.as_str()).or_default() += 1;
    }
    let resource_usage: Vec<ResourceUsageInfo> = usage
        .into_iter()
        .map(|(resource_name, total)| ResourceUsageInfo {
            resource_name: resource_name.to_string(),
            total,
        })
        .collect();

    let total_bookings: usize = bookings.len();
    bookings.sort_by(|a, b| {
        b.booking_date()
            .cmp(&a.booking_date())
            .then(b.booking_id.cmp(&a.booking_id))
    });
    let recent_activity: Vec<BookingInfo> = bookings
        .iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|b| booking_info(b, context))
        .collect::<Result<_, _>>()?;

    Ok(DashboardResponse {
        today: render_date(today)?,
        total_bookings,
        upcoming_events,
        pending_requests,
        active_resources,
        resource_usage,
        recent_activity,
    })
}

// ========================================================================
// Notifications
// ========================================================================

/// Lists the caller's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_notifications(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
    unread_only: bool,
) -> Result<ListNotificationsResponse, ApiError> {
    let notifications: Vec<NotificationData> = persistence
        .list_notifications(&authenticated_actor.id, unread_only)
        .map_err(translate_persistence_error)?;
    let unread_count: usize = notifications.iter().filter(|n| !n.is_read).count();

    Ok(ListNotificationsResponse {
        notifications: notifications
            .into_iter()
            .map(NotificationInfo::from)
            .collect(),
        unread_count,
    })
}

/// Marks one of the caller's notifications as read.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the notification does not exist or
/// belongs to someone else.
pub fn mark_notification_read(
    persistence: &mut Persistence,
    notification_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    persistence
        .mark_notification_read(notification_id, &authenticated_actor.id)
        .map_err(translate_persistence_error)?;
    debug!(notification_id, user = %authenticated_actor.id, "Notification marked read");
    Ok(())
}

// ========================================================================
// Helpers
// ========================================================================

fn booking_info(booking: &Booking, context: &BookingContext) -> Result<BookingInfo, ApiError> {
    BookingInfo::from_booking(booking, &context.calendar).map_err(translate_domain_error)
}

fn render_date(date: Date) -> Result<String, ApiError> {
    format_booking_date(date).map_err(translate_domain_error)
}

fn stored_event(transition: &TransitionResult, stored: &PersistTransitionResult) -> AuditEvent {
    match stored.booking.booking_id {
        Some(booking_id) => transition
            .audit_event
            .clone()
            .with_ids(stored.event_id, booking_id),
        None => transition.audit_event.clone(),
    }
}
