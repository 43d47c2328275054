//! Bookings and their joined detail projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::{NewVehicle, PublicUser, Supplier, Vehicle};
use crate::domain::timeslot::Timeslot;

/// Linear booking lifecycle; `cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting administrator review.
    Pending,
    /// Confirmed by an administrator.
    Approved,
    /// Withdrawn; never leaves this state.
    Cancelled,
}

impl BookingStatus {
    /// Whether a booking in this status counts against slot capacity.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// A supplier's reservation of one timeslot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Sequential identifier.
    pub id: i64,
    /// Booking supplier.
    pub supplier_id: i64,
    /// Account that created the booking.
    pub user_id: i64,
    /// Vehicle declared for the visit.
    pub vehicle_id: i64,
    /// Reserved slot.
    pub timeslot_id: i64,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Free-form comment from the supplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a booking via the allocator.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// Booking supplier.
    pub supplier_id: i64,
    /// Account creating the booking.
    pub user_id: i64,
    /// Slot to reserve.
    pub timeslot_id: i64,
    /// Vehicle declared for the visit.
    pub vehicle: NewVehicle,
    /// Free-form comment.
    pub comment: Option<String>,
}

/// A booking joined with the entities it references.
///
/// The store guarantees every reference resolves; assembling this projection
/// for a booking with a dangling reference is an internal defect, not a
/// client-facing error.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    /// The booking record itself.
    #[serde(flatten)]
    pub booking: Booking,
    /// Owning supplier.
    pub supplier: Supplier,
    /// Creating account, with the credential hash stripped.
    pub user: PublicUser,
    /// Reserved slot.
    pub timeslot: Timeslot,
    /// Declared vehicle.
    pub vehicle: Vehicle,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BookingStatus::Pending, true)]
    #[case(BookingStatus::Approved, true)]
    #[case(BookingStatus::Cancelled, false)]
    fn only_cancelled_bookings_are_inactive(#[case] status: BookingStatus, #[case] active: bool) {
        assert_eq!(status.is_active(), active);
    }

    #[rstest]
    #[case(BookingStatus::Pending, "pending")]
    #[case(BookingStatus::Approved, "approved")]
    #[case(BookingStatus::Cancelled, "cancelled")]
    fn statuses_serialise_lowercase(#[case] status: BookingStatus, #[case] expected: &str) {
        assert_eq!(
            serde_json::to_value(status).expect("serialise"),
            serde_json::json!(expected)
        );
    }
}
