//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for the
//! portal REST API: every endpoint in the inbound layer, the shared error
//! schema, and the session security schemes (cookie and bearer). The
//! generated document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "portal_token",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the portal REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Dock booking portal API",
        description = "Supplier registration, dock timeslot booking, and administrator review."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = []), ("BearerToken" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::docks::list_docks,
        crate::inbound::http::timeslots::list_timeslots,
        crate::inbound::http::bookings::list_my_bookings,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::cancel_booking,
        crate::inbound::http::admin::list_bookings,
        crate::inbound::http::admin::approve_booking,
        crate::inbound::http::admin::cancel_booking,
        crate::inbound::http::admin::generate_timeslots,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::AuthPayload,
        crate::domain::PublicUser,
        crate::domain::Supplier,
        crate::domain::SupplierStatus,
        crate::domain::UserRole,
        crate::domain::Dock,
        crate::domain::Timeslot,
        crate::domain::TimeslotSummary,
        crate::domain::Booking,
        crate::domain::BookingStatus,
        crate::domain::BookingDetails,
        crate::domain::Vehicle,
        crate::inbound::http::auth::RegisterRequest,
        crate::inbound::http::auth::LoginRequest,
        crate::inbound::http::auth::SessionResponse,
        crate::inbound::http::profile::ProfileResponse,
        crate::inbound::http::profile::UpdateProfileRequest,
        crate::inbound::http::bookings::VehicleRequest,
        crate::inbound::http::bookings::CreateBookingRequest,
        crate::inbound::http::admin::GenerateTimeslotsRequest,
    )),
    tags(
        (name = "auth", description = "Registration, login, and logout"),
        (name = "profile", description = "The authenticated account"),
        (name = "docks", description = "Loading docks"),
        (name = "timeslots", description = "Dock timeslots and availability"),
        (name = "bookings", description = "Supplier bookings"),
        (name = "admin", description = "Administrator review and calendar management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
