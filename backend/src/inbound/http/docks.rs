//! Dock listing endpoint.
//!
//! ```text
//! GET /api/docks
//! ```

use actix_web::{get, web};

use crate::domain::{Dock, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;

/// All docks, in creation order.
#[utoipa::path(
    get,
    path = "/api/docks",
    responses(
        (status = 200, description = "Docks", body = [Dock]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["docks"],
    operation_id = "listDocks"
)]
#[get("/docks")]
pub async fn list_docks(
    state: web::Data<HttpState>,
    _identity: Identity,
) -> ApiResult<web::Json<Vec<Dock>>> {
    let store = state.lock_store()?;
    Ok(web::Json(store.list_docks()))
}
