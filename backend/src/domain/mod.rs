//! Domain primitives and the in-memory portal store.
//!
//! Purpose: define strongly typed booking-portal entities and the business
//! rules over them — the booking allocator, the timeslot generator, the
//! detail joiner, and credential handling. Everything here is transport
//! agnostic; inbound adapters map these types onto HTTP.

pub mod auth;
pub mod booking;
pub mod entities;
pub mod error;
pub mod password;
pub mod store;
pub mod timeslot;
pub mod token;

pub use self::auth::{AuthPayload, LoginCredentials, LoginValidationError, Registration};
pub use self::booking::{Booking, BookingDetails, BookingStatus, NewBooking};
pub use self::entities::{
    AppUser, Dock, NewDock, NewSupplier, NewUser, NewVehicle, PublicUser, Supplier,
    SupplierContactUpdate, SupplierStatus, UserContactUpdate, UserRole, Vehicle,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::store::{PortalStore, UPCOMING_LIMIT};
pub use self::timeslot::{SlotSchedule, Timeslot, TimeslotSummary};
pub use self::token::{CredentialError, SessionClaims, TokenIssuer};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn guard() -> ApiResult<()> {
///     Err(Error::forbidden("administrators only"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
