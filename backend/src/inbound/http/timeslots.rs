//! Timeslot listing endpoint.
//!
//! ```text
//! GET /api/timeslots?date=YYYY-MM-DD
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, TimeslotSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date};

/// Query parameters for the timeslot listing.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TimeslotQuery {
    /// Calendar day to list; omitted for the upcoming window.
    pub date: Option<String>,
}

/// Slots for one calendar day, or the next 200 upcoming slots.
///
/// Every returned slot carries its live available capacity and a full flag.
#[utoipa::path(
    get,
    path = "/api/timeslots",
    params(TimeslotQuery),
    responses(
        (status = 200, description = "Timeslots with availability", body = [TimeslotSummary]),
        (status = 400, description = "Invalid date", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["timeslots"],
    operation_id = "listTimeslots"
)]
#[get("/timeslots")]
pub async fn list_timeslots(
    state: web::Data<HttpState>,
    _identity: Identity,
    query: web::Query<TimeslotQuery>,
) -> ApiResult<web::Json<Vec<TimeslotSummary>>> {
    let store = state.lock_store()?;
    let slots = match &query.date {
        Some(raw) => {
            let date = parse_date(raw, FieldName::new("date"))?;
            store.list_timeslots_by_date(date)?
        }
        None => store.list_upcoming_timeslots()?,
    };
    Ok(web::Json(slots))
}
