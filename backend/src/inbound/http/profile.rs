//! Profile endpoints for the authenticated account.
//!
//! ```text
//! GET /api/me
//! PUT /api/me
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, PublicUser, Supplier, SupplierContactUpdate, UserContactUpdate,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::Identity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, optional_trimmed, valid_email};

/// The caller's account and supplier, as returned by the profile endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Account projection without the credential hash.
    pub user: PublicUser,
    /// Owning supplier, where the account has one.
    pub supplier: Option<Supplier>,
}

/// Contact fields accepted by `PUT /api/me`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// Replacement email for the account and supplier.
    pub email: Option<String>,
    /// Replacement contact phone.
    pub phone: Option<String>,
    /// Replacement supplier postal address.
    pub address: Option<String>,
}

/// Current account and supplier.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/me")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<ProfileResponse>> {
    let store = state.lock_store()?;
    let supplier = identity
        .user
        .supplier_id
        .and_then(|id| store.find_supplier_by_id(id))
        .cloned();
    Ok(web::Json(ProfileResponse {
        user: PublicUser::from(&identity.user),
        supplier,
    }))
}

/// Merge contact fields into the account and, where linked, its supplier.
///
/// Only fields present in the body are applied; everything else keeps its
/// stored value.
#[utoipa::path(
    put,
    path = "/api/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[put("/me")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let body = payload.into_inner();
    let email = optional_trimmed(body.email)
        .map(|value| valid_email(value, FieldName::new("email")))
        .transpose()?;
    let phone = optional_trimmed(body.phone);
    let address = optional_trimmed(body.address);

    let mut store = state.lock_store()?;
    let user = store
        .update_user_contact(
            identity.user_id(),
            &UserContactUpdate {
                email: email.clone(),
                phone: phone.clone(),
            },
        )
        .ok_or_else(|| Error::internal("authenticated account vanished from the store"))?;

    let supplier = match identity.user.supplier_id {
        Some(supplier_id) => store.update_supplier_contact(
            supplier_id,
            &SupplierContactUpdate {
                email,
                phone,
                address,
            },
        ),
        None => None,
    };

    Ok(web::Json(ProfileResponse {
        user: PublicUser::from(&user),
        supplier,
    }))
}
