// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod live;
mod notifier;
mod session;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use campus_book::NotificationSender;
use campus_book_api::{
    ApiError, ApiResult, AuditTimelineResponse, BookingContext, BookingDraftRequest, BookingInfo,
    CalendarResponse, CheckConflictsResponse, ConflictInfo, DashboardResponse,
    GetBookingResponse, ListBookingsResponse, ListNotificationsResponse, ResourcesResponse,
    ReviewBookingRequest, ReviewBookingResponse, SearchResponse, SlotsResponse,
    SubmitBookingRequest, SubmitBookingResponse, translate_domain_error,
};
use campus_book_domain::{
    BreakWindow, CalendarVisibility, DEFAULT_TIMEZONE, ResourceCatalog, SlotCalendar,
    SlotCalendarConfig, Tz, parse_booking_date, parse_timezone, today_in,
};
use campus_book_persistence::Persistence;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use time::{Date, Time};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::error::ServerError;
use crate::live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use crate::notifier::TracingNotifier;
use crate::session::{OptionalActor, RequestActor};

/// Campus Book Server - HTTP server for campus resource bookings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Start of the bookable day (`HH:MM`, on a half hour)
    #[arg(long, default_value = "09:00")]
    day_start: String,

    /// End of the bookable day (`HH:MM`, on a half hour)
    #[arg(long, default_value = "17:00")]
    day_end: String,

    /// Start of the daily break
    #[arg(long, default_value = "13:00")]
    break_start: String,

    /// End of the daily break
    #[arg(long, default_value = "14:00")]
    break_end: String,

    /// Disable the daily break entirely
    #[arg(long)]
    no_break: bool,

    /// IANA time zone used to turn timestamps into campus dates
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// Which bookings non-admins see on the calendar
    /// (`all`, `approved-and-own`, `approved-only`)
    #[arg(long, default_value = "approved-and-own")]
    calendar_visibility: String,
}

/// Application state shared across handlers.
///
/// The persistence mutex also serializes the check-then-insert sequence of
/// submissions, so two overlapping requests cannot both pass the check.
#[derive(Clone)]
struct AppState {
    /// The booking store.
    persistence: Arc<Mutex<Persistence>>,
    /// Immutable calendar, catalog, and policy configuration.
    context: Arc<BookingContext>,
    /// Live event broadcaster for calendar clients.
    broadcaster: Arc<LiveEventBroadcaster>,
    /// Outbound delivery for review notifications.
    notifier: TracingNotifier,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.broadcaster)
    }
}

/// Query parameters for GET `/bookings`.
#[derive(Debug, Deserialize)]
struct ListBookingsQuery {
    /// Only bookings made by this requester.
    requester_id: Option<String>,
}

/// Query parameters for GET `/calendar`.
#[derive(Debug, Deserialize)]
struct CalendarQuery {
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    date: String,
}

/// Query parameters for GET `/search`.
#[derive(Debug, Deserialize)]
struct SearchQuery {
    /// Free text matched against resources and bookings.
    #[serde(default)]
    q: String,
}

/// Query parameters for GET `/dashboard`.
#[derive(Debug, Deserialize)]
struct DashboardQuery {
    /// Date to count upcoming events from. Defaults to today on campus.
    date: Option<String>,
}

/// Query parameters for GET `/notifications`.
#[derive(Debug, Deserialize)]
struct NotificationsQuery {
    /// Only unread notifications.
    #[serde(default)]
    unread_only: bool,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Colliding bookings, for 409 responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    conflicts: Vec<ConflictInfo>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Colliding bookings, when the error is a conflict.
    conflicts: Vec<ConflictInfo>,
}

impl HttpError {
    const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            conflicts: Vec::new(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            conflicts: self.conflicts,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::AuthenticationFailed { .. } => Self::new(StatusCode::UNAUTHORIZED, message),
            ApiError::Unauthorized { .. } => Self::new(StatusCode::FORBIDDEN, message),
            ApiError::DomainRuleViolation { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            ApiError::InvalidInput { .. } => Self::new(StatusCode::BAD_REQUEST, message),
            ApiError::ResourceNotFound { .. } => Self::new(StatusCode::NOT_FOUND, message),
            ApiError::BookingConflict { conflicts } => Self {
                status: StatusCode::CONFLICT,
                message,
                conflicts,
            },
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

/// Builds the live event for a freshly stored or re-statused booking.
fn live_event_for(booking: &BookingInfo, submitted: bool) -> Option<LiveEvent> {
    let booking_id: i64 = booking.booking_id?;
    let resource_key: String = booking.resource_key.clone();
    let booking_date: String = booking.booking_date.clone();
    Some(if submitted {
        LiveEvent::BookingSubmitted {
            booking_id,
            resource_key,
            booking_date,
        }
    } else {
        LiveEvent::BookingStatusChanged {
            booking_id,
            resource_key,
            booking_date,
            status: booking.status.clone(),
        }
    })
}

/// Fans a completed review out to the notifier and live clients.
fn publish_review(app_state: &AppState, result: &ApiResult<ReviewBookingResponse>) {
    if let Some(notification) = &result.notification {
        app_state.notifier.notify(notification);
    }
    if let Some(event) = live_event_for(&result.response.booking, false) {
        app_state.broadcaster.broadcast(&event);
    }
}

/// Handler for GET `/slots`.
async fn handle_list_slots(AxumState(app_state): AxumState<AppState>) -> Json<SlotsResponse> {
    Json(campus_book_api::list_slots(&app_state.context))
}

/// Handler for GET `/resources`.
async fn handle_list_resources(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ResourcesResponse>, HttpError> {
    Ok(Json(campus_book_api::list_resources(&app_state.context)?))
}

/// Handler for POST `/bookings/check`.
///
/// Runs the conflict check against a fresh snapshot. Nothing is stored.
async fn handle_check_conflicts(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor, _cause): RequestActor,
    Json(req): Json<BookingDraftRequest>,
) -> Result<Json<CheckConflictsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CheckConflictsResponse =
        campus_book_api::check_conflicts(&mut persistence, &app_state.context, &req, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings`.
///
/// Checks and stores the booking under one lock.
async fn handle_submit_booking(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor, cause): RequestActor,
    Json(req): Json<SubmitBookingRequest>,
) -> Result<(StatusCode, Json<SubmitBookingResponse>), HttpError> {
    info!(
        actor_id = %actor.id,
        resource_type = %req.draft.resource_type,
        booking_date = %req.draft.booking_date,
        "Handling submit_booking request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<SubmitBookingResponse> = campus_book_api::submit_booking(
        &mut persistence,
        &app_state.context,
        &req,
        &actor,
        cause,
    )?;
    drop(persistence);

    if let Some(event) = live_event_for(&result.response.booking, true) {
        app_state.broadcaster.broadcast(&event);
    }

    Ok((StatusCode::CREATED, Json(result.response)))
}

/// Handler for GET `/bookings`.
async fn handle_list_bookings(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor, _cause): RequestActor,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListBookingsResponse = campus_book_api::list_bookings(
        &mut persistence,
        &app_state.context,
        query.requester_id.as_deref(),
        &actor,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/bookings/{booking_id}`.
async fn handle_get_booking(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    RequestActor(actor, _cause): RequestActor,
) -> Result<Json<GetBookingResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: GetBookingResponse =
        campus_book_api::get_booking(&mut persistence, &app_state.context, booking_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/bookings/{booking_id}/approve`.
async fn handle_approve_booking(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    RequestActor(actor, cause): RequestActor,
) -> Result<Json<ReviewBookingResponse>, HttpError> {
    info!(actor_id = %actor.id, booking_id, "Handling approve_booking request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ReviewBookingResponse> = campus_book_api::approve_booking(
        &mut persistence,
        &app_state.context,
        booking_id,
        &actor,
        cause,
    )?;
    drop(persistence);

    publish_review(&app_state, &result);
    Ok(Json(result.response))
}

/// Handler for POST `/bookings/{booking_id}/reject`.
async fn handle_reject_booking(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    RequestActor(actor, cause): RequestActor,
    Json(req): Json<ReviewBookingRequest>,
) -> Result<Json<ReviewBookingResponse>, HttpError> {
    info!(actor_id = %actor.id, booking_id, "Handling reject_booking request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ReviewBookingResponse> = campus_book_api::reject_booking(
        &mut persistence,
        &app_state.context,
        booking_id,
        req,
        &actor,
        cause,
    )?;
    drop(persistence);

    publish_review(&app_state, &result);
    Ok(Json(result.response))
}

/// Handler for POST `/bookings/{booking_id}/cancel`.
async fn handle_cancel_booking(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    RequestActor(actor, cause): RequestActor,
    Json(req): Json<ReviewBookingRequest>,
) -> Result<Json<ReviewBookingResponse>, HttpError> {
    info!(actor_id = %actor.id, booking_id, "Handling cancel_booking request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ReviewBookingResponse> = campus_book_api::cancel_booking(
        &mut persistence,
        &app_state.context,
        booking_id,
        req,
        &actor,
        cause,
    )?;
    drop(persistence);

    publish_review(&app_state, &result);
    Ok(Json(result.response))
}

/// Handler for GET `/calendar`.
///
/// Anonymous callers get the policy's public view.
async fn handle_calendar(
    AxumState(app_state): AxumState<AppState>,
    OptionalActor(actor): OptionalActor,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CalendarResponse = campus_book_api::calendar_view(
        &mut persistence,
        &app_state.context,
        &query.date,
        actor.as_ref(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/audit/booking/{booking_id}`.
async fn handle_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    RequestActor(actor, _cause): RequestActor,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AuditTimelineResponse =
        campus_book_api::get_audit_timeline(&mut persistence, booking_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/search`.
async fn handle_search(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor, _cause): RequestActor,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SearchResponse =
        campus_book_api::search(&mut persistence, &app_state.context, &query.q, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/dashboard`.
async fn handle_dashboard(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor, _cause): RequestActor,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, HttpError> {
    let timezone: Tz = app_state.context.timezone;
    let today: Date = match query.date.as_deref() {
        Some(date) => parse_booking_date(date, timezone),
        None => today_in(timezone),
    }
    .map_err(translate_domain_error)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: DashboardResponse =
        campus_book_api::dashboard(&mut persistence, &app_state.context, today, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/notifications`.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    RequestActor(actor, _cause): RequestActor,
    Query(query): Query<NotificationsQuery>,
) -> Result<Json<ListNotificationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListNotificationsResponse =
        campus_book_api::list_notifications(&mut persistence, &actor, query.unread_only)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/notifications/{id}/read`.
async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    Path(notification_id): Path<i64>,
    RequestActor(actor, _cause): RequestActor,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    campus_book_api::mark_notification_read(&mut persistence, notification_id, &actor)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/slots", get(handle_list_slots))
        .route("/resources", get(handle_list_resources))
        .route("/bookings/check", post(handle_check_conflicts))
        .route(
            "/bookings",
            post(handle_submit_booking).get(handle_list_bookings),
        )
        .route("/bookings/{booking_id}", get(handle_get_booking))
        .route("/bookings/{booking_id}/approve", post(handle_approve_booking))
        .route("/bookings/{booking_id}/reject", post(handle_reject_booking))
        .route("/bookings/{booking_id}/cancel", post(handle_cancel_booking))
        .route("/calendar", get(handle_calendar))
        .route("/audit/booking/{booking_id}", get(handle_audit_timeline))
        .route("/search", get(handle_search))
        .route("/dashboard", get(handle_dashboard))
        .route("/notifications", get(handle_list_notifications))
        .route(
            "/notifications/{notification_id}/read",
            post(handle_mark_notification_read),
        )
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

/// Parses an `HH:MM` option value.
fn parse_clock(option: &'static str, value: &str) -> Result<Time, ServerError> {
    let format = time::macros::format_description!("[hour]:[minute]");
    Time::parse(value.trim(), &format).map_err(|e| ServerError::InvalidConfig {
        option,
        reason: format!("'{value}' is not HH:MM ({e})"),
    })
}

/// Turns the command-line options into the shared booking context.
fn build_context(args: &Args) -> Result<BookingContext, ServerError> {
    let break_window: Option<BreakWindow> = if args.no_break {
        None
    } else {
        Some(BreakWindow {
            start: parse_clock("break-start", &args.break_start)?,
            end: parse_clock("break-end", &args.break_end)?,
        })
    };

    let calendar: SlotCalendar = SlotCalendar::new(SlotCalendarConfig {
        day_start: parse_clock("day-start", &args.day_start)?,
        day_end: parse_clock("day-end", &args.day_end)?,
        break_window,
    })?;

    let timezone: Tz = parse_timezone(&args.timezone).map_err(|e| ServerError::InvalidConfig {
        option: "timezone",
        reason: e.to_string(),
    })?;

    let visibility: CalendarVisibility = CalendarVisibility::from_str(&args.calendar_visibility)
        .map_err(|e| ServerError::InvalidConfig {
            option: "calendar-visibility",
            reason: e.to_string(),
        })?;

    Ok(BookingContext::new(
        calendar,
        ResourceCatalog::campus_default(),
        timezone,
        visibility,
    ))
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Campus Book Server");

    let context: BookingContext = build_context(&args)?;
    info!(
        slots = context.calendar.full_day_slots().len(),
        timezone = %context.timezone,
        visibility = context.visibility.as_str(),
        "Slot calendar ready"
    );

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        context: Arc::new(context),
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
        notifier: TracingNotifier,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
