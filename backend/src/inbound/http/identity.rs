//! Authenticated request identity.
//!
//! Extracts the session token from the `portal_token` cookie or the
//! `Authorization: Bearer` header, verifies it, and resolves the account from
//! the store. Handlers declare an [`Identity`] parameter instead of touching
//! tokens themselves.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use crate::domain::{AppUser, Error, UserRole};
use crate::inbound::http::auth::COOKIE_NAME;
use crate::inbound::http::state::HttpState;

/// The verified account behind the current request.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Full account record, including role and supplier link.
    pub user: AppUser,
}

impl Identity {
    /// Account id of the caller.
    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    /// Require the administrator role or fail with `403 Forbidden`.
    pub fn require_admin(&self) -> Result<(), Error> {
        if self.user.role == UserRole::Admin {
            Ok(())
        } else {
            Err(Error::forbidden("administrator role required"))
        }
    }

    /// Require a supplier link or fail with `403 Forbidden`.
    pub fn require_supplier(&self) -> Result<i64, Error> {
        self.user
            .supplier_id
            .ok_or_else(|| Error::forbidden("only supplier accounts can create bookings"))
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header_value = req.headers().get(header::AUTHORIZATION)?;
    let raw = header_value.to_str().ok()?;
    raw.strip_prefix("Bearer ").map(str::to_owned)
}

fn extract_token(req: &HttpRequest) -> Option<String> {
    req.cookie(COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .or_else(|| bearer_token(req))
}

fn authenticate(req: &HttpRequest) -> Result<Identity, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;

    let token =
        extract_token(req).ok_or_else(|| Error::unauthorized("authentication required"))?;
    let claims = state
        .tokens
        .decode(&token)
        .map_err(|_| Error::unauthorized("invalid or expired session token"))?;

    let store = state.lock_store()?;
    let user = store
        .find_user_by_id(claims.sub)
        .cloned()
        .ok_or_else(|| Error::unauthorized("account no longer exists"))?;

    Ok(Identity { user })
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn identity(role: UserRole, supplier_id: Option<i64>) -> Identity {
        Identity {
            user: AppUser {
                id: 5,
                supplier_id,
                username: "acme".into(),
                email: "ops@acme.test".into(),
                phone: None,
                password_hash: "$argon2id$stub".into(),
                role,
                is_active: true,
                created_at: Utc::now(),
            },
        }
    }

    #[rstest]
    fn admin_role_is_required_for_admin_guard() {
        assert!(identity(UserRole::Admin, None).require_admin().is_ok());
        let err = identity(UserRole::SupplierUser, Some(1))
            .require_admin()
            .expect_err("supplier users are not admins");
        assert_eq!(err.code(), crate::domain::ErrorCode::Forbidden);
    }

    #[rstest]
    fn supplier_guard_needs_a_supplier_link() {
        assert_eq!(
            identity(UserRole::SupplierUser, Some(7)).require_supplier(),
            Ok(7)
        );
        let err = identity(UserRole::Admin, None)
            .require_supplier()
            .expect_err("no supplier link");
        assert_eq!(err.code(), crate::domain::ErrorCode::Forbidden);
    }
}
