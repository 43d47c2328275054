//! Authentication endpoints.
//!
//! ```text
//! POST /api/auth/register
//! POST /api/auth/login
//! POST /api/auth/logout
//! ```
//!
//! Successful registration and login set the `portal_token` HTTP-only cookie
//! and also return the token in the payload for bearer-header clients.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{
    AuthPayload, CredentialError, Error, LoginCredentials, LoginValidationError, Registration,
    auth,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, non_blank, optional_trimmed, strong_password, valid_email,
};

/// Name of the session cookie set on register/login and cleared on logout.
pub const COOKIE_NAME: &str = "portal_token";

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Supplier organisation title.
    pub supplier_title: String,
    /// Tax registration number.
    pub inn: Option<String>,
    /// Tax registration reason code.
    pub kpp: Option<String>,
    /// Supplier postal address.
    pub address: Option<String>,
    /// Supplier contact email.
    pub email: String,
    /// Supplier contact phone.
    pub phone: Option<String>,
    /// Login name for the new account.
    pub username: String,
    /// Account email.
    pub account_email: String,
    /// Account contact phone.
    pub account_phone: Option<String>,
    /// Plaintext password.
    pub password: String,
    /// Terms-of-service acknowledgement; accepted but not stored.
    pub accept_terms: Option<bool>,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Username or account email.
    pub identifier: String,
    /// Plaintext password.
    pub password: String,
}

/// Session payload returned by register and login.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Authenticated identity.
    #[serde(flatten)]
    pub session: AuthPayload,
    /// Bearer token mirroring the session cookie.
    pub token: String,
}

fn token_failure(err: CredentialError) -> Error {
    Error::internal(format!("token issuance failed: {err}"))
}

fn session_cookie(token: String, state: &HttpState) -> Cookie<'static> {
    Cookie::build(COOKIE_NAME, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .max_age(CookieDuration::seconds(state.tokens.ttl_secs()))
        .finish()
}

fn validate_registration(body: RegisterRequest) -> Result<Registration, Error> {
    let supplier_title = non_blank(body.supplier_title, FieldName::new("supplierTitle"))?;
    let email = valid_email(body.email, FieldName::new("email"))?;
    let username = non_blank(body.username, FieldName::new("username"))?;
    let account_email = valid_email(body.account_email, FieldName::new("accountEmail"))?;
    strong_password(&body.password, FieldName::new("password"))?;

    Ok(Registration {
        supplier_title,
        inn: optional_trimmed(body.inn),
        kpp: optional_trimmed(body.kpp),
        email: Some(email),
        phone: optional_trimmed(body.phone),
        address: optional_trimmed(body.address),
        username,
        account_email,
        account_phone: optional_trimmed(body.account_phone),
        password: Zeroizing::new(body.password),
    })
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyIdentifier => {
            Error::invalid_request("identifier must not be empty")
                .with_details(json!({ "field": "identifier", "code": "blank_field" }))
        }
        LoginValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "blank_field" }))
        }
    }
}

/// Register a supplier and its first account, establishing a session.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username or email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = validate_registration(payload.into_inner())?;
    let session = {
        let mut store = state.lock_store()?;
        auth::register(&mut store, registration)?
    };
    let token = state
        .tokens
        .issue(session.id, session.role)
        .map_err(token_failure)?;
    let cookie = session_cookie(token.clone(), &state);
    Ok(HttpResponse::Created()
        .cookie(cookie)
        .json(SessionResponse { session, token }))
}

/// Authenticate with username-or-email and password.
///
/// Unknown identifiers and wrong passwords produce the same generic
/// unauthorized error, so responses cannot be used to enumerate accounts.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&body.identifier, &body.password)
        .map_err(map_login_validation_error)?;

    // Clone the candidate out of the lock so hash verification runs without
    // holding the store.
    let candidate = state
        .lock_store()?
        .find_user_by_identifier(credentials.identifier())
        .cloned();
    let user = auth::verify_credentials(candidate, credentials.password())?;

    let supplier = match user.supplier_id {
        Some(id) => state.lock_store()?.find_supplier_by_id(id).cloned(),
        None => None,
    };

    let session = AuthPayload::from_user(&user, supplier);
    let token = state
        .tokens
        .issue(session.id, session.role)
        .map_err(token_failure)?;
    let cookie = session_cookie(token.clone(), &state);
    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(SessionResponse { session, token }))
}

/// Clear the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cookie cleared")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::new(COOKIE_NAME, "");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.make_removal();
    HttpResponse::NoContent().cookie(cookie).finish()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn register_body() -> RegisterRequest {
        RegisterRequest {
            supplier_title: "  Acme Logistics  ".into(),
            inn: Some("  12345  ".into()),
            kpp: Some("   ".into()),
            address: None,
            email: " office@acme.test ".into(),
            phone: None,
            username: " acme ".into(),
            account_email: "ops@acme.test".into(),
            account_phone: None,
            password: "Secret#Pass1".into(),
            accept_terms: Some(true),
        }
    }

    #[rstest]
    fn registration_inputs_are_trimmed() {
        let registration = validate_registration(register_body()).expect("valid body");
        assert_eq!(registration.supplier_title, "Acme Logistics");
        assert_eq!(registration.username, "acme");
        assert_eq!(registration.inn.as_deref(), Some("12345"));
        // Blank optionals collapse to absent.
        assert_eq!(registration.kpp, None);
        assert_eq!(registration.email.as_deref(), Some("office@acme.test"));
    }

    #[rstest]
    fn weak_passwords_are_rejected_with_field_details() {
        let mut body = register_body();
        body.password = "weak".into();
        let err = validate_registration(body).expect_err("weak password");
        assert_eq!(
            err.details()
                .and_then(|d| d.get("field"))
                .and_then(|f| f.as_str()),
            Some("password")
        );
    }

    #[rstest]
    #[case(LoginValidationError::EmptyIdentifier, "identifier")]
    #[case(LoginValidationError::EmptyPassword, "password")]
    fn login_validation_errors_carry_the_field(
        #[case] err: LoginValidationError,
        #[case] field: &str,
    ) {
        let mapped = map_login_validation_error(err);
        assert_eq!(mapped.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(
            mapped
                .details()
                .and_then(|d| d.get("field"))
                .and_then(|f| f.as_str()),
            Some(field)
        );
    }
}
