//! In-memory portal store.
//!
//! Owns every entity collection and its sequence counter, and implements the
//! booking allocator, the detail joiner, the query surface, and timeslot
//! (re)generation. The store is an explicit object passed by handle to
//! request handlers; nothing here is a process-wide singleton.
//!
//! Identifier sequences are monotonic per entity kind and never reused.
//! Cancellation is a status change, never removal, so "deleted" bookings keep
//! their historical identifiers.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use mockable::Clock;
use serde_json::json;
use tracing::error;

use crate::domain::booking::{Booking, BookingDetails, BookingStatus, NewBooking};
use crate::domain::entities::{
    AppUser, Dock, NewDock, NewSupplier, NewUser, NewVehicle, PublicUser, Supplier,
    SupplierContactUpdate, SupplierStatus, UserContactUpdate, Vehicle,
};
use crate::domain::error::Error;
use crate::domain::timeslot::{SlotSchedule, Timeslot, TimeslotSummary};

/// Upper bound on the upcoming-timeslot listing, in storage order.
pub const UPCOMING_LIMIT: usize = 200;

fn next_id(seq: &mut i64) -> i64 {
    let id = *seq;
    *seq += 1;
    id
}

/// Mutable collection of portal entities plus their sequence counters.
pub struct PortalStore {
    clock: Arc<dyn Clock>,
    schedule: SlotSchedule,
    suppliers: Vec<Supplier>,
    users: Vec<AppUser>,
    docks: Vec<Dock>,
    timeslots: Vec<Timeslot>,
    bookings: Vec<Booking>,
    vehicles: Vec<Vehicle>,
    supplier_seq: i64,
    user_seq: i64,
    dock_seq: i64,
    timeslot_seq: i64,
    booking_seq: i64,
    vehicle_seq: i64,
}

impl PortalStore {
    /// Create an empty store with the default slot schedule.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            schedule: SlotSchedule::default(),
            suppliers: Vec::new(),
            users: Vec::new(),
            docks: Vec::new(),
            timeslots: Vec::new(),
            bookings: Vec::new(),
            vehicles: Vec::new(),
            supplier_seq: 1,
            user_seq: 1,
            dock_seq: 1,
            timeslot_seq: 1,
            booking_seq: 1,
            vehicle_seq: 1,
        }
    }

    /// Create a supplier in `active` status.
    pub fn create_supplier(&mut self, input: NewSupplier) -> Supplier {
        let supplier = Supplier {
            id: next_id(&mut self.supplier_seq),
            title: input.title,
            inn: input.inn,
            kpp: input.kpp,
            email: input.email,
            phone: input.phone,
            address: input.address,
            status: SupplierStatus::Active,
            created_at: self.clock.utc(),
        };
        self.suppliers.push(supplier.clone());
        supplier
    }

    /// Create a portal account.
    pub fn create_user(&mut self, input: NewUser) -> AppUser {
        let user = AppUser {
            id: next_id(&mut self.user_seq),
            supplier_id: input.supplier_id,
            username: input.username,
            email: input.email,
            phone: input.phone,
            password_hash: input.password_hash,
            role: input.role,
            is_active: input.is_active,
            created_at: self.clock.utc(),
        };
        self.users.push(user.clone());
        user
    }

    /// Create a dock. Docks exist from seed time onwards and are never
    /// mutated.
    pub fn create_dock(&mut self, input: NewDock) -> Dock {
        let dock = Dock {
            id: next_id(&mut self.dock_seq),
            title: input.title,
            location: input.location,
            constraints: input.constraints,
        };
        self.docks.push(dock.clone());
        dock
    }

    fn create_vehicle(&mut self, input: NewVehicle) -> Vehicle {
        let vehicle = Vehicle {
            id: next_id(&mut self.vehicle_seq),
            number_plate: input.number_plate,
            r#type: input.r#type,
            capacity: input.capacity,
        };
        self.vehicles.push(vehicle.clone());
        vehicle
    }

    /// All docks, in creation order.
    pub fn list_docks(&self) -> Vec<Dock> {
        self.docks.clone()
    }

    /// Look up an account by id.
    pub fn find_user_by_id(&self, id: i64) -> Option<&AppUser> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Look up an account by username or email, case-insensitively.
    pub fn find_user_by_identifier(&self, identifier: &str) -> Option<&AppUser> {
        let needle = identifier.to_lowercase();
        self.users.iter().find(|user| {
            user.username.to_lowercase() == needle || user.email.to_lowercase() == needle
        })
    }

    /// Look up a supplier by id.
    pub fn find_supplier_by_id(&self, id: i64) -> Option<&Supplier> {
        self.suppliers.iter().find(|supplier| supplier.id == id)
    }

    /// Merge contact fields into an account; `None` when the id is unknown.
    pub fn update_user_contact(
        &mut self,
        id: i64,
        update: &UserContactUpdate,
    ) -> Option<AppUser> {
        let user = self.users.iter_mut().find(|user| user.id == id)?;
        update.apply(user);
        Some(user.clone())
    }

    /// Merge contact fields into a supplier; `None` when the id is unknown.
    pub fn update_supplier_contact(
        &mut self,
        id: i64,
        update: &SupplierContactUpdate,
    ) -> Option<Supplier> {
        let supplier = self.suppliers.iter_mut().find(|supplier| supplier.id == id)?;
        update.apply(supplier);
        Some(supplier.clone())
    }

    /// Admit a booking against a timeslot.
    ///
    /// Fails with `not_found` for an unknown slot, and with
    /// `invalid_request` when the slot is at capacity or the supplier
    /// already holds an active booking on it. The vehicle record is created
    /// only once every check has passed, so a rejected request persists
    /// nothing.
    pub fn create_booking(&mut self, input: NewBooking) -> Result<BookingDetails, Error> {
        let timeslot = self
            .timeslots
            .iter()
            .find(|slot| slot.id == input.timeslot_id)
            .cloned()
            .ok_or_else(|| Error::not_found("timeslot not found"))?;

        let active: Vec<(i64, i64)> = self
            .bookings
            .iter()
            .filter(|booking| booking.timeslot_id == timeslot.id && booking.status.is_active())
            .map(|booking| (booking.id, booking.supplier_id))
            .collect();

        if active.len() >= timeslot.capacity as usize {
            return Err(Error::invalid_request("timeslot is already full").with_details(json!({
                "timeslotId": timeslot.id,
                "code": "timeslot_full",
            })));
        }

        if active
            .iter()
            .any(|(_, supplier_id)| *supplier_id == input.supplier_id)
        {
            return Err(Error::invalid_request(
                "an active booking already exists for this timeslot",
            )
            .with_details(json!({
                "timeslotId": timeslot.id,
                "code": "duplicate_booking",
            })));
        }

        let vehicle = self.create_vehicle(input.vehicle);
        let booking = Booking {
            id: next_id(&mut self.booking_seq),
            supplier_id: input.supplier_id,
            user_id: input.user_id,
            vehicle_id: vehicle.id,
            timeslot_id: input.timeslot_id,
            status: BookingStatus::Pending,
            comment: input.comment,
            created_at: self.clock.utc(),
        };
        self.bookings.push(booking.clone());

        self.booking_details(&booking)
    }

    /// All bookings, joined with details.
    pub fn list_bookings(&self) -> Result<Vec<BookingDetails>, Error> {
        self.bookings
            .iter()
            .map(|booking| self.booking_details(booking))
            .collect()
    }

    /// Bookings created by the given account.
    pub fn list_bookings_for_user(&self, user_id: i64) -> Result<Vec<BookingDetails>, Error> {
        self.bookings
            .iter()
            .filter(|booking| booking.user_id == user_id)
            .map(|booking| self.booking_details(booking))
            .collect()
    }

    /// Bookings owned by the given supplier.
    pub fn list_bookings_for_supplier(
        &self,
        supplier_id: i64,
    ) -> Result<Vec<BookingDetails>, Error> {
        self.bookings
            .iter()
            .filter(|booking| booking.supplier_id == supplier_id)
            .map(|booking| self.booking_details(booking))
            .collect()
    }

    /// Look up a booking by id, joined with details.
    pub fn find_booking(&self, id: i64) -> Result<Option<BookingDetails>, Error> {
        self.bookings
            .iter()
            .find(|booking| booking.id == id)
            .map(|booking| self.booking_details(booking))
            .transpose()
    }

    /// Confirm a pending booking.
    ///
    /// Approving an already-approved booking is a no-op; a cancelled booking
    /// is terminal and cannot be approved.
    pub fn approve_booking(&mut self, id: i64) -> Result<BookingDetails, Error> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|booking| booking.id == id)
            .ok_or_else(|| Error::not_found("booking not found"))?;

        if booking.status == BookingStatus::Cancelled {
            return Err(
                Error::invalid_request("booking is already cancelled").with_details(json!({
                    "bookingId": id,
                    "code": "booking_cancelled",
                })),
            );
        }

        booking.status = BookingStatus::Approved;
        let snapshot = booking.clone();
        self.booking_details(&snapshot)
    }

    /// Cancel a booking. Idempotent: cancelling a cancelled booking keeps it
    /// cancelled and succeeds.
    pub fn cancel_booking(&mut self, id: i64) -> Result<BookingDetails, Error> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|booking| booking.id == id)
            .ok_or_else(|| Error::not_found("booking not found"))?;

        booking.status = BookingStatus::Cancelled;
        let snapshot = booking.clone();
        self.booking_details(&snapshot)
    }

    /// Timeslots whose start instant falls on the given UTC calendar day.
    pub fn list_timeslots_by_date(&self, date: NaiveDate) -> Result<Vec<TimeslotSummary>, Error> {
        self.timeslots
            .iter()
            .filter(|slot| slot.start_at.date_naive() == date)
            .map(|slot| self.slot_summary(slot))
            .collect()
    }

    /// Timeslots starting after now − 1 day, capped at [`UPCOMING_LIMIT`] in
    /// storage order.
    pub fn list_upcoming_timeslots(&self) -> Result<Vec<TimeslotSummary>, Error> {
        let horizon = self.clock.utc() - Duration::days(1);
        self.timeslots
            .iter()
            .filter(|slot| slot.start_at > horizon)
            .take(UPCOMING_LIMIT)
            .map(|slot| self.slot_summary(slot))
            .collect()
    }

    /// Generate slots for every dock for every day in `[start, start+days)`.
    ///
    /// Idempotent on the exact (dock, start instant) pair: a slot is skipped
    /// when one already exists for the same dock and the same instant,
    /// regardless of the zone the earlier run was generated with.
    pub fn generate_timeslots(&mut self, start_day: NaiveDate, days: u32, tz: Tz) {
        for offset in 0..days {
            let Some(day) = start_day.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            let capacity = self.schedule.capacity_for(day.weekday());
            let dock_ids: Vec<i64> = self.docks.iter().map(|dock| dock.id).collect();
            for dock_id in dock_ids {
                for (start_at, end_at) in self.schedule.day_windows(day, tz) {
                    let exists = self
                        .timeslots
                        .iter()
                        .any(|slot| slot.dock_id == dock_id && slot.start_at == start_at);
                    if exists {
                        continue;
                    }
                    self.timeslots.push(Timeslot {
                        id: next_id(&mut self.timeslot_seq),
                        dock_id,
                        start_at,
                        end_at,
                        capacity,
                    });
                }
            }
        }
    }

    /// Replace every slot starting on/after `start_day` with a freshly
    /// generated set; earlier slots are preserved unchanged. The identifier
    /// sequence restarts one past the highest surviving id. Returns the
    /// upcoming listing.
    pub fn regenerate_timeslots(
        &mut self,
        start_day: NaiveDate,
        days: u32,
        tz: Tz,
    ) -> Result<Vec<TimeslotSummary>, Error> {
        let cutoff = day_start_instant(start_day, tz).ok_or_else(|| {
            Error::invalid_request("start date is not representable in the requested time zone")
        })?;

        self.timeslots.retain(|slot| slot.start_at < cutoff);
        self.timeslot_seq = self
            .timeslots
            .iter()
            .map(|slot| slot.id)
            .max()
            .map_or(1, |id| id + 1);

        self.generate_timeslots(start_day, days, tz);
        self.list_upcoming_timeslots()
    }

    fn slot_summary(&self, slot: &Timeslot) -> Result<TimeslotSummary, Error> {
        let bookings = self
            .bookings
            .iter()
            .filter(|booking| booking.timeslot_id == slot.id && booking.status.is_active())
            .map(|booking| self.booking_details(booking))
            .collect::<Result<Vec<_>, Error>>()?;
        let active = u32::try_from(bookings.len()).unwrap_or(u32::MAX);
        let available_capacity = slot.capacity.saturating_sub(active);
        Ok(TimeslotSummary {
            timeslot: slot.clone(),
            bookings,
            available_capacity,
            is_full: available_capacity == 0,
        })
    }

    fn booking_details(&self, booking: &Booking) -> Result<BookingDetails, Error> {
        let supplier = self.find_supplier_by_id(booking.supplier_id);
        let user = self.find_user_by_id(booking.user_id);
        let timeslot = self
            .timeslots
            .iter()
            .find(|slot| slot.id == booking.timeslot_id);
        let vehicle = self
            .vehicles
            .iter()
            .find(|vehicle| vehicle.id == booking.vehicle_id);

        let (Some(supplier), Some(user), Some(timeslot), Some(vehicle)) =
            (supplier, user, timeslot, vehicle)
        else {
            error!(booking_id = booking.id, "booking references a missing entity");
            return Err(Error::internal("booking references are inconsistent"));
        };

        Ok(BookingDetails {
            booking: booking.clone(),
            supplier: supplier.clone(),
            user: PublicUser::from(user),
            timeslot: timeslot.clone(),
            vehicle: vehicle.clone(),
        })
    }
}

fn day_start_instant(day: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    let midnight = day.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&midnight)
        .earliest()
        // Zones that skip midnight on a transition day resume within the hour.
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|instant| instant.with_timezone(&Utc))
}
