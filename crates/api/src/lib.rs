// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for Campus Book.
//!
//! Handlers in this crate take an already authenticated actor, enforce
//! role checks, translate wire requests into core commands, persist the
//! results, and translate every lower-level error into an [`ApiError`].
//!
//! Nothing here knows about HTTP; the server crate maps [`ApiError`]
//! variants to status codes.

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

mod auth;
mod capabilities;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use capabilities::compute_booking_capabilities;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    ApiResult, BookingContext, approve_booking, calendar_view, cancel_booking, check_conflicts,
    dashboard, get_audit_timeline, get_booking, list_bookings, list_notifications,
    list_resources, list_slots, mark_notification_read, reject_booking, search, submit_booking,
};
pub use request_response::{
    AuditEventInfo, AuditTimelineResponse, BookingCapabilities, BookingDraftRequest, BookingInfo,
    CalendarEntryInfo, CalendarResponse, Capability, CheckConflictsResponse, ConflictInfo,
    DashboardResponse, DepartmentCategoryInfo, DepartmentInfo, GetBookingResponse,
    ListBookingsResponse, ListNotificationsResponse, NotificationInfo, ResourceInfo,
    ResourceUsageInfo, ResourcesResponse, ReviewBookingRequest, ReviewBookingResponse,
    SearchResponse, SlotInfo, SlotsResponse, SubmitBookingRequest, SubmitBookingResponse,
};
