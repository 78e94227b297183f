// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use std::str::FromStr;

use campus_book_audit::AuditEvent;
use campus_book_domain::{
    Booking, BookingDetails, BookingDraft, CatalogResource, ConflictEntry, DepartmentCategory,
    DomainError, DurationMode, ResourceRef, ResourceType, Slot, SlotCalendar, SlotSet, Tz,
    describe_slots, format_booking_date, parse_booking_date,
};
use campus_book_persistence::NotificationData;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ========================================================================
// Drafts and submissions
// ========================================================================

/// The resource, date, and slots of a booking as sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingDraftRequest {
    /// `venue`, `bus`, or `turf`.
    pub resource_type: String,
    /// Catalog id, for venues and buses.
    #[serde(default)]
    pub resource_id: Option<String>,
    /// Turf sub-area, for turf bookings.
    #[serde(default)]
    pub sub_area: Option<String>,
    /// `YYYY-MM-DD`, or an RFC 3339 timestamp normalized to the campus date.
    pub booking_date: String,
    /// Slot start times as `HH:MM`. Ignored for full-day drafts.
    #[serde(default)]
    pub slots: Vec<String>,
    /// `custom` (the default) or `full-day`.
    #[serde(default)]
    pub duration_mode: Option<String>,
}

impl BookingDraftRequest {
    /// Parses the request into a domain draft.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails to parse.
    pub fn to_draft(&self, calendar: &SlotCalendar, tz: Tz) -> Result<BookingDraft, DomainError> {
        let resource: ResourceRef = ResourceRef {
            resource_type: ResourceType::from_str(&self.resource_type)?,
            resource_id: self.resource_id.clone(),
            sub_area: self.sub_area.clone(),
        };
        let booking_date = parse_booking_date(&self.booking_date, tz)?;
        let mode: DurationMode = match &self.duration_mode {
            Some(mode) => DurationMode::from_str(mode)?,
            None => DurationMode::Custom,
        };

        match mode {
            DurationMode::FullDay => Ok(BookingDraft::full_day(resource, booking_date, calendar)),
            DurationMode::Custom => {
                let slots: SlotSet = calendar.parse_slots(&self.slots)?;
                Ok(BookingDraft::custom(resource, booking_date, slots))
            }
        }
    }
}

/// API request to submit a booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitBookingRequest {
    /// What, when, and which slots.
    #[serde(flatten)]
    pub draft: BookingDraftRequest,
    /// Event title.
    pub event_title: String,
    /// Event description.
    pub event_description: String,
    /// Expected attendance.
    pub attendees: u32,
    /// Department category, by id or name.
    pub department_category: String,
    /// Department, by id or name.
    pub department: String,
    /// Faculty member responsible for the event.
    #[serde(default)]
    pub faculty_incharge: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub contact_number: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Requester display name.
    pub requester_name: String,
    /// Requester email.
    pub requester_email: String,
}

impl SubmitBookingRequest {
    /// The event details carried by this request.
    #[must_use]
    pub fn details(&self) -> BookingDetails {
        BookingDetails {
            event_title: self.event_title.clone(),
            event_description: self.event_description.clone(),
            attendees: self.attendees,
            department_category: self.department_category.clone(),
            department: self.department.clone(),
            faculty_incharge: self.faculty_incharge.clone(),
            contact_number: self.contact_number.clone(),
            contact_email: self.contact_email.clone(),
        }
    }
}

/// API request body for reject and cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewBookingRequest {
    /// Why the booking is being rejected or cancelled.
    #[serde(default)]
    pub reason: Option<String>,
}

// ========================================================================
// Conflicts
// ========================================================================

/// One booking that collides with a draft.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConflictInfo {
    /// The colliding booking's ID.
    pub booking_id: Option<i64>,
    /// Its event title.
    pub event_title: String,
    /// Its department.
    pub department: String,
    /// Its status.
    pub status: String,
    /// The slots both bookings want.
    pub overlapping_slots: Vec<String>,
}

impl ConflictInfo {
    /// Builds the wire form of a conflict entry.
    #[must_use]
    pub fn from_entry(entry: &ConflictEntry) -> Self {
        Self {
            booking_id: entry.booking_id,
            event_title: entry.event_title.clone(),
            department: entry.department.clone(),
            status: entry.status.as_str().to_string(),
            overlapping_slots: entry.overlapping_slots.iter().map(Slot::label).collect(),
        }
    }
}

/// API response for a conflict check.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CheckConflictsResponse {
    /// The checked resource key.
    pub resource_key: String,
    /// The checked date.
    pub booking_date: String,
    /// True when nothing collides and the draft may be submitted.
    pub available: bool,
    /// Colliding bookings, ordered by booking ID.
    pub conflicts: Vec<ConflictInfo>,
}

// ========================================================================
// Bookings
// ========================================================================

/// A booking as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingInfo {
    /// The booking ID.
    pub booking_id: Option<i64>,
    /// The resource key.
    pub resource_key: String,
    /// The resource display name.
    pub resource_name: String,
    /// `venue`, `bus`, or `turf`.
    pub resource_type: String,
    /// Booking date as `YYYY-MM-DD`.
    pub booking_date: String,
    /// Slot start times, ascending.
    pub slots: Vec<String>,
    /// `custom` or `full-day`.
    pub duration_mode: String,
    /// Human-readable time of the booking.
    pub time_label: String,
    /// Event title.
    pub event_title: String,
    /// Event description.
    pub event_description: String,
    /// Expected attendance.
    pub attendees: u32,
    /// Department category.
    pub department_category: String,
    /// Department.
    pub department: String,
    /// Faculty member responsible for the event.
    pub faculty_incharge: Option<String>,
    /// Contact phone number.
    pub contact_number: Option<String>,
    /// Contact email.
    pub contact_email: Option<String>,
    /// Requester user ID.
    pub requester_id: String,
    /// Requester display name.
    pub requester_name: String,
    /// Requester email.
    pub requester_email: String,
    /// Current status.
    pub status: String,
    /// Reason for a rejection or cancellation.
    pub status_reason: Option<String>,
    /// Who reviewed the booking.
    pub reviewed_by: Option<String>,
    /// When it was reviewed, RFC 3339.
    pub reviewed_at: Option<String>,
    /// When it was submitted, RFC 3339.
    pub created_at: Option<String>,
}

impl BookingInfo {
    /// Builds the wire form of a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the date or time label cannot be rendered.
    pub fn from_booking(booking: &Booking, calendar: &SlotCalendar) -> Result<Self, DomainError> {
        Ok(Self {
            booking_id: booking.booking_id,
            resource_key: booking.resource_key.as_str().to_string(),
            resource_name: booking.resource_name.clone(),
            resource_type: booking.draft.resource.resource_type.as_str().to_string(),
            booking_date: format_booking_date(booking.booking_date())?,
            slots: booking.slots().labels(),
            duration_mode: booking.draft.duration_mode.as_str().to_string(),
            time_label: describe_slots(calendar, booking.slots(), booking.draft.duration_mode)?,
            event_title: booking.details.event_title.clone(),
            event_description: booking.details.event_description.clone(),
            attendees: booking.details.attendees,
            department_category: booking.details.department_category.clone(),
            department: booking.details.department.clone(),
            faculty_incharge: booking.details.faculty_incharge.clone(),
            contact_number: booking.details.contact_number.clone(),
            contact_email: booking.details.contact_email.clone(),
            requester_id: booking.requester.requester_id.clone(),
            requester_name: booking.requester.name.clone(),
            requester_email: booking.requester.email.clone(),
            status: booking.status.as_str().to_string(),
            status_reason: booking.status_reason.clone(),
            reviewed_by: booking.reviewed_by.clone(),
            reviewed_at: booking.reviewed_at.and_then(format_timestamp),
            created_at: booking.created_at.and_then(format_timestamp),
        })
    }
}

fn format_timestamp(at: OffsetDateTime) -> Option<String> {
    at.format(&Rfc3339).ok()
}

/// API response for a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitBookingResponse {
    /// The stored booking, in `Pending` status.
    pub booking: BookingInfo,
    /// A success message.
    pub message: String,
}

/// API response for approve, reject, and cancel.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewBookingResponse {
    /// The booking after the transition.
    pub booking: BookingInfo,
    /// The status before the transition.
    pub previous_status: String,
    /// The ID of the in-app notification sent to the requester.
    pub notification_id: Option<i64>,
    /// A success message.
    pub message: String,
}

/// API response for a single booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetBookingResponse {
    /// The booking.
    pub booking: BookingInfo,
    /// What the caller may do with it.
    pub capabilities: BookingCapabilities,
}

/// API response for a booking listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListBookingsResponse {
    /// The bookings.
    pub bookings: Vec<BookingInfo>,
}

// ========================================================================
// Calendar
// ========================================================================

/// API response for the calendar of one date.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalendarResponse {
    /// The date shown, `YYYY-MM-DD`.
    pub booking_date: String,
    /// The visibility policy that was applied.
    pub visibility: String,
    /// Visible bookings, ordered by first slot.
    pub entries: Vec<CalendarEntryInfo>,
}

/// One booking on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalendarEntryInfo {
    /// The booking ID.
    pub booking_id: Option<i64>,
    /// The resource key.
    pub resource_key: String,
    /// The resource display name.
    pub resource_name: String,
    /// Human-readable time of the booking.
    pub time_label: String,
    /// Slot start times, ascending.
    pub slots: Vec<String>,
    /// Event title.
    pub event_title: String,
    /// Department.
    pub department: String,
    /// Current status.
    pub status: String,
    /// True when the viewer made this request.
    pub is_own: bool,
}

// ========================================================================
// Slots and catalog
// ========================================================================

/// One bookable slot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotInfo {
    /// Start time, `HH:MM`.
    pub start: String,
    /// End time, `HH:MM`.
    pub end: String,
}

/// API response for the slot vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotsResponse {
    /// The full-day sequence, ascending.
    pub slots: Vec<SlotInfo>,
    /// Label used for full-day bookings.
    pub full_day_label: String,
}

/// One bookable resource.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResourceInfo {
    /// The resource key.
    pub resource_key: String,
    /// `venue`, `bus`, or `turf`.
    pub resource_type: String,
    /// Catalog id or turf sub-area.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Maximum attendance, when limited.
    pub capacity: Option<u32>,
    /// Facilities on offer.
    pub facilities: Vec<String>,
}

impl ResourceInfo {
    /// Builds the wire form of a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry has no valid key.
    pub fn from_resource(resource: &CatalogResource) -> Result<Self, DomainError> {
        Ok(Self {
            resource_key: resource.key()?.as_str().to_string(),
            resource_type: resource.resource_type.as_str().to_string(),
            id: resource.id.clone(),
            name: resource.name.clone(),
            capacity: resource.capacity,
            facilities: resource.facilities.clone(),
        })
    }
}

/// A department.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DepartmentInfo {
    /// Department id.
    pub id: String,
    /// Department name.
    pub name: String,
}

/// A department category with its departments.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DepartmentCategoryInfo {
    /// Category id.
    pub id: String,
    /// Category name.
    pub name: String,
    /// Departments in this category.
    pub departments: Vec<DepartmentInfo>,
}

impl From<&DepartmentCategory> for DepartmentCategoryInfo {
    fn from(category: &DepartmentCategory) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            departments: category
                .departments
                .iter()
                .map(|d| DepartmentInfo {
                    id: d.id.clone(),
                    name: d.name.clone(),
                })
                .collect(),
        }
    }
}

/// API response for the resource catalog.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResourcesResponse {
    /// Every bookable resource.
    pub resources: Vec<ResourceInfo>,
    /// Department categories for the booking form.
    pub department_categories: Vec<DepartmentCategoryInfo>,
}

// ========================================================================
// Search and dashboard
// ========================================================================

/// API response for a free-text search.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
    /// The query as searched, trimmed.
    pub query: String,
    /// Catalog resources matching by name, or venues by facility.
    pub resources: Vec<ResourceInfo>,
    /// Bookings visible to the caller, newest booking date first.
    pub bookings: Vec<BookingInfo>,
}

/// How many bookings name one resource.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResourceUsageInfo {
    /// Resource display name.
    pub resource_name: String,
    /// Bookings in any status.
    pub total: usize,
}

/// API response for the dashboard summary.
///
/// Requesters see figures over their own bookings, admins over all of them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DashboardResponse {
    /// The campus date the summary was computed for, `YYYY-MM-DD`.
    pub today: String,
    /// Bookings in any status.
    pub total_bookings: usize,
    /// Approved bookings dated today or later.
    pub upcoming_events: usize,
    /// Bookings awaiting review.
    pub pending_requests: usize,
    /// Venues and buses in the catalog.
    pub active_resources: usize,
    /// Booking counts per resource, by resource name.
    pub resource_usage: Vec<ResourceUsageInfo>,
    /// The three bookings with the latest booking dates.
    pub recent_activity: Vec<BookingInfo>,
}

// ========================================================================
// Audit
// ========================================================================

/// One audit event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    /// The event ID.
    pub event_id: Option<i64>,
    /// Who acted.
    pub actor_id: String,
    /// The actor's role.
    pub actor_type: String,
    /// The request that caused the event.
    pub cause_id: String,
    /// Description of the cause.
    pub cause_description: String,
    /// The action name.
    pub action: String,
    /// Details of the action.
    pub details: Option<String>,
    /// State before the action.
    pub before_snapshot: String,
    /// State after the action.
    pub after_snapshot: String,
}

impl From<&AuditEvent> for AuditEventInfo {
    fn from(event: &AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before_snapshot: event.before.data.clone(),
            after_snapshot: event.after.data.clone(),
        }
    }
}

/// API response for a booking's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTimelineResponse {
    /// The booking ID.
    pub booking_id: i64,
    /// Events, oldest first.
    pub events: Vec<AuditEventInfo>,
}

// ========================================================================
// Notifications
// ========================================================================

/// One in-app notification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationInfo {
    /// The notification ID.
    pub notification_id: i64,
    /// The booking it concerns.
    pub booking_id: Option<i64>,
    /// Subject line.
    pub title: String,
    /// Body text.
    pub message: String,
    /// `info`, `success`, `warning`, or `error`.
    pub kind: String,
    /// Whether the user has read it.
    pub is_read: bool,
    /// When it was created, RFC 3339.
    pub created_at: String,
}

impl From<NotificationData> for NotificationInfo {
    fn from(data: NotificationData) -> Self {
        Self {
            notification_id: data.notification_id,
            booking_id: data.booking_id,
            title: data.title,
            message: data.message,
            kind: data.kind,
            is_read: data.is_read,
            created_at: data.created_at,
        }
    }
}

/// API response for a notification listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListNotificationsResponse {
    /// Notifications, newest first.
    pub notifications: Vec<NotificationInfo>,
    /// How many are unread.
    pub unread_count: usize,
}

// ========================================================================
// Capabilities
// ========================================================================

/// Represents whether a specific action is permitted.
///
/// This enum provides better type safety than raw booleans and serializes
/// to JSON as true/false for API compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(matches!(self, Self::Allowed))
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// What the caller may do with one booking.
///
/// Advisory only; every handler re-checks authorization.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingCapabilities {
    /// Whether the booking can be approved.
    pub can_approve: Capability,
    /// Whether the booking can be rejected.
    pub can_reject: Capability,
    /// Whether the booking can be cancelled.
    pub can_cancel: Capability,
}
