//! HTTP server assembly: state construction and app wiring.

pub mod config;

use std::sync::Arc;

use actix_web::{App, web};
use mockable::{Clock, DefaultClock};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::{Error, PortalStore, TokenIssuer};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{admin, auth, bookings, docks, health, profile, timeslots};
use crate::seed::seed_demo_data;
use crate::server::config::ServerConfig;

/// Build handler state from configuration: a (possibly seeded) store plus the
/// token issuer.
pub fn build_state(config: &ServerConfig) -> Result<web::Data<HttpState>, Error> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let mut store = PortalStore::new(Arc::clone(&clock));
    if config.seed_demo_data {
        seed_demo_data(&mut store, clock.as_ref())?;
    }
    let tokens = TokenIssuer::new(&config.token_secret, config.token_ttl_secs);
    Ok(web::Data::new(HttpState::new(
        store,
        tokens,
        config.cookie_secure,
    )))
}

/// Assemble the actix application: the `/api` scope plus health probes, and
/// Swagger UI in debug builds.
pub fn build_app(
    state: web::Data<HttpState>,
    health_state: web::Data<health::HealthState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(profile::get_profile)
        .service(profile::update_profile)
        .service(docks::list_docks)
        .service(timeslots::list_timeslots)
        .service(bookings::list_my_bookings)
        .service(bookings::create_booking)
        .service(bookings::cancel_booking)
        .service(admin::list_bookings)
        .service(admin::approve_booking)
        .service(admin::cancel_booking)
        .service(admin::generate_timeslots);

    let app = App::new()
        .app_data(state)
        .app_data(health_state)
        .service(api)
        .service(health::ready)
        .service(health::live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::ApiDoc::openapi()));

    app
}
