//! Shared harness for endpoint integration tests.
//!
//! Builds the real application against a freshly seeded in-memory store and
//! provides request helpers for the common authentication flows.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use backend::domain::{PortalStore, TokenIssuer};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::seed::seed_demo_data;
use backend::server::build_app;
use mockable::DefaultClock;

/// Demo administrator credentials from the seeded store.
pub const ADMIN_IDENTIFIER: &str = "admin";
/// Demo administrator password from the seeded store.
pub const ADMIN_PASSWORD: &str = "AdminPortal#2025";
/// A password satisfying the registration policy.
pub const VALID_PASSWORD: &str = "Secret#Pass1";

/// Build handler state over a seeded store with a test signing secret.
pub fn seeded_state() -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let mut store = PortalStore::new(clock.clone());
    seed_demo_data(&mut store, clock.as_ref()).expect("seed demo data");
    web::Data::new(HttpState::new(
        store,
        TokenIssuer::new(b"integration-test-secret", 60 * 60),
        false,
    ))
}

/// The full application over the given state.
pub fn portal_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    build_app(state, web::Data::new(HealthState::new()))
}

/// Register a supplier account and return its bearer token plus the session
/// payload.
pub async fn register_supplier<S>(app: &S, name: &str) -> (String, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(serde_json::json!({
            "supplierTitle": format!("{name} Logistics"),
            "email": format!("office@{name}.test"),
            "username": name,
            "accountEmail": format!("ops@{name}.test"),
            "password": VALID_PASSWORD,
            "acceptTerms": true,
        }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(
        response.status(),
        actix_web::http::StatusCode::CREATED,
        "registration should succeed for {name}"
    );
    let body: Value = actix_test::read_body_json(response).await;
    let token = body
        .get("token")
        .and_then(Value::as_str)
        .expect("session token in payload")
        .to_owned();
    (token, body)
}

/// Log in with an identifier/password pair and return the raw response.
pub async fn login_response<S>(app: &S, identifier: &str, password: &str) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({
            "identifier": identifier,
            "password": password,
        }))
        .to_request();
    actix_test::call_service(app, request).await
}

/// Log in and return the bearer token, asserting success.
pub async fn login_token<S>(app: &S, identifier: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = login_response(app, identifier, password).await;
    assert!(response.status().is_success(), "login should succeed");
    let body: Value = actix_test::read_body_json(response).await;
    body.get("token")
        .and_then(Value::as_str)
        .expect("session token in payload")
        .to_owned()
}

/// GET a path with a bearer token and return the parsed JSON body, asserting
/// a 200 response.
pub async fn get_json<S>(app: &S, token: &str, path: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::get()
        .uri(path)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(
        response.status().is_success(),
        "GET {path} should succeed, got {}",
        response.status()
    );
    actix_test::read_body_json(response).await
}

/// Pick a weekday (capacity two) timeslot id from the upcoming listing.
pub async fn weekday_slot_id<S>(app: &S, token: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let slots = get_json(app, token, "/api/timeslots").await;
    slots
        .as_array()
        .expect("timeslot array")
        .iter()
        .find(|slot| slot.get("capacity").and_then(Value::as_u64) == Some(2))
        .and_then(|slot| slot.get("id"))
        .and_then(Value::as_i64)
        .expect("a weekday slot within the upcoming window")
}

/// Create a booking on a slot and return the raw response.
pub async fn create_booking_response<S>(
    app: &S,
    token: &str,
    timeslot_id: i64,
    plate: &str,
) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/bookings")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({
            "timeslotId": timeslot_id,
            "comment": "pallets",
            "vehicle": { "numberPlate": plate, "type": "box truck" },
        }))
        .to_request();
    actix_test::call_service(app, request).await
}
