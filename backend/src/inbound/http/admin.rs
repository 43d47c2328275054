//! Administrator endpoints.
//!
//! ```text
//! GET /api/admin/bookings
//! POST /api/admin/bookings/{id}/approve
//! POST /api/admin/bookings/{id}/cancel
//! POST /api/admin/timeslots/generate
//! ```

use actix_web::{get, post, web};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BookingDetails, Error, TimeslotSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, at_least_one_day, parse_date, parse_zone};

const DEFAULT_GENERATION_DAYS: u32 = 14;
const DEFAULT_GENERATION_ZONE: Tz = chrono_tz::Europe::Amsterdam;

/// Request body for regenerating the timeslot calendar.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTimeslotsRequest {
    /// First calendar day to regenerate, `YYYY-MM-DD`.
    pub start: String,
    /// Number of days to generate; defaults to 14.
    pub days: Option<u32>,
    /// IANA zone the working hours are expressed in; defaults to
    /// Europe/Amsterdam.
    pub timezone: Option<String>,
}

/// Every booking in the store, joined with details.
#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    responses(
        (status = 200, description = "All bookings", body = [BookingDetails]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrator role required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListBookings"
)]
#[get("/admin/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<Vec<BookingDetails>>> {
    identity.require_admin()?;
    let store = state.lock_store()?;
    Ok(web::Json(store.list_bookings()?))
}

/// Confirm a pending booking.
#[utoipa::path(
    post,
    path = "/api/admin/bookings/{id}/approve",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Approved booking", body = BookingDetails),
        (status = 400, description = "Booking is cancelled", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrator role required", body = Error),
        (status = 404, description = "Unknown booking", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminApproveBooking"
)]
#[post("/admin/bookings/{id}/approve")]
pub async fn approve_booking(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<i64>,
) -> ApiResult<web::Json<BookingDetails>> {
    identity.require_admin()?;
    let mut store = state.lock_store()?;
    Ok(web::Json(store.approve_booking(path.into_inner())?))
}

/// Cancel any booking.
#[utoipa::path(
    post,
    path = "/api/admin/bookings/{id}/cancel",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Cancelled booking", body = BookingDetails),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrator role required", body = Error),
        (status = 404, description = "Unknown booking", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminCancelBooking"
)]
#[post("/admin/bookings/{id}/cancel")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<i64>,
) -> ApiResult<web::Json<BookingDetails>> {
    identity.require_admin()?;
    let mut store = state.lock_store()?;
    Ok(web::Json(store.cancel_booking(path.into_inner())?))
}

/// Regenerate the timeslot calendar from a start day onwards.
///
/// Slots starting before the given day are preserved; everything on or after
/// it is replaced by a fresh generation run. Responds with the upcoming
/// listing so admin consoles can refresh in one round trip.
#[utoipa::path(
    post,
    path = "/api/admin/timeslots/generate",
    request_body = GenerateTimeslotsRequest,
    responses(
        (status = 200, description = "Upcoming timeslots after regeneration", body = [TimeslotSummary]),
        (status = 400, description = "Invalid start date, days, or zone", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrator role required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminGenerateTimeslots"
)]
#[post("/admin/timeslots/generate")]
pub async fn generate_timeslots(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<GenerateTimeslotsRequest>,
) -> ApiResult<web::Json<Vec<TimeslotSummary>>> {
    identity.require_admin()?;
    let body = payload.into_inner();

    let start = parse_date(&body.start, FieldName::new("start"))?;
    let days = at_least_one_day(
        body.days.unwrap_or(DEFAULT_GENERATION_DAYS),
        FieldName::new("days"),
    )?;
    let zone = body
        .timezone
        .map(|raw| parse_zone(&raw, FieldName::new("timezone")))
        .transpose()?
        .unwrap_or(DEFAULT_GENERATION_ZONE);

    let mut store = state.lock_store()?;
    Ok(web::Json(store.regenerate_timeslots(start, days, zone)?))
}
