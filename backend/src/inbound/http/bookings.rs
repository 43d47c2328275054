//! Booking endpoints for supplier accounts.
//!
//! ```text
//! GET /api/bookings/my
//! POST /api/bookings
//! DELETE /api/bookings/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    BookingDetails, Error, NewBooking, NewVehicle, UserRole,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, non_blank, non_negative, optional_trimmed};

/// Vehicle fields accepted when creating a booking.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    /// Licence plate string.
    pub number_plate: String,
    /// Vehicle type.
    pub r#type: Option<String>,
    /// Load capacity; must not be negative.
    pub capacity: Option<i64>,
}

/// Request body for creating a booking.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Slot to reserve.
    pub timeslot_id: i64,
    /// Free-form comment for the warehouse.
    pub comment: Option<String>,
    /// Vehicle declared for the visit.
    pub vehicle: VehicleRequest,
}

fn validate_vehicle(body: VehicleRequest) -> Result<NewVehicle, Error> {
    let number_plate = non_blank(body.number_plate, FieldName::new("vehicle.numberPlate"))?;
    let capacity = body
        .capacity
        .map(|value| non_negative(value, FieldName::new("vehicle.capacity")))
        .transpose()?;
    Ok(NewVehicle {
        number_plate,
        r#type: optional_trimmed(body.r#type),
        capacity,
    })
}

/// The caller's bookings: everything for administrators, the supplier's
/// bookings for supplier users, empty otherwise.
#[utoipa::path(
    get,
    path = "/api/bookings/my",
    responses(
        (status = 200, description = "Bookings with details", body = [BookingDetails]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "listMyBookings"
)]
#[get("/bookings/my")]
pub async fn list_my_bookings(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<Vec<BookingDetails>>> {
    let store = state.lock_store()?;
    let bookings = if identity.user.role == UserRole::Admin {
        store.list_bookings()?
    } else if let Some(supplier_id) = identity.user.supplier_id {
        store.list_bookings_for_supplier(supplier_id)?
    } else {
        Vec::new()
    };
    Ok(web::Json(bookings))
}

/// Reserve a timeslot for the caller's supplier.
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Created booking", body = BookingDetails),
        (status = 400, description = "Slot full, duplicate booking, or bad input", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Account has no supplier", body = Error),
        (status = 404, description = "Unknown timeslot", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<CreateBookingRequest>,
) -> ApiResult<HttpResponse> {
    let supplier_id = identity.require_supplier()?;
    let body = payload.into_inner();
    let vehicle = validate_vehicle(body.vehicle)?;

    let mut store = state.lock_store()?;
    let booking = store.create_booking(NewBooking {
        supplier_id,
        user_id: identity.user_id(),
        timeslot_id: body.timeslot_id,
        vehicle,
        comment: optional_trimmed(body.comment),
    })?;
    Ok(HttpResponse::Created().json(booking))
}

/// Cancel a booking.
///
/// Administrators may cancel any booking; other callers only their own. An
/// unknown id yields an empty object rather than an error, so stale clients
/// can retry deletes safely.
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Cancelled booking, or empty when unknown"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the caller's booking", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "cancelBooking"
)]
#[delete("/bookings/{id}")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let mut store = state.lock_store()?;

    let Some(existing) = store.find_booking(id)? else {
        return Ok(HttpResponse::Ok().json(serde_json::json!({})));
    };

    if identity.user.role != UserRole::Admin && existing.booking.user_id != identity.user_id() {
        return Err(Error::forbidden("only your own booking can be cancelled"));
    }

    let cancelled = store.cancel_booking(id)?;
    Ok(HttpResponse::Ok().json(cancelled))
}
