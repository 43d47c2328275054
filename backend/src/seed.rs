//! Demo data seeding.
//!
//! Populates a fresh store with the demo warehouse: two docks, fourteen days
//! of timeslots, and an administrator account. Runs at startup unless
//! disabled by configuration.

use chrono_tz::Tz;
use mockable::Clock;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::domain::{
    Error, NewDock, NewSupplier, NewUser, PortalStore, UserRole, password::hash_password,
};

/// Zone the demo calendar is generated in.
pub const DEMO_ZONE: Tz = chrono_tz::Europe::Amsterdam;

/// Days of timeslots generated at seed time.
pub const DEMO_CALENDAR_DAYS: u32 = 14;

/// Login of the seeded administrator account.
pub const DEMO_ADMIN_USERNAME: &str = "admin";

/// Email of the seeded administrator account.
pub const DEMO_ADMIN_EMAIL: &str = "admin@dock.demo";

/// Password of the seeded administrator account. Demo deployments only.
pub const DEMO_ADMIN_PASSWORD: &str = "AdminPortal#2025";

fn constraints(entries: &[(&str, &str)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_owned(), json!(value)))
        .collect()
}

/// Seed docks, the demo calendar, and the administrator account.
pub fn seed_demo_data(store: &mut PortalStore, clock: &dyn Clock) -> Result<(), Error> {
    store.create_dock(NewDock {
        title: "Main dock".into(),
        location: Some("Warehouse No. 1, Amsterdam".into()),
        constraints: constraints(&[("maxHeight", "4.0 m"), ("note", "Reverse-in entry only")]),
    });
    store.create_dock(NewDock {
        title: "North dock".into(),
        location: Some("Warehouse No. 2, Rotterdam".into()),
        constraints: constraints(&[("temperature", "Cold chain")]),
    });

    let today = clock.utc().with_timezone(&DEMO_ZONE).date_naive();
    store.generate_timeslots(today, DEMO_CALENDAR_DAYS, DEMO_ZONE);

    let admin_supplier = store.create_supplier(NewSupplier {
        title: "Warehouse administration".into(),
        email: Some(DEMO_ADMIN_EMAIL.into()),
        phone: Some("+31 20 000 0000".into()),
        address: Some("Teststraat 1, Amsterdam".into()),
        ..NewSupplier::default()
    });

    let password_hash = hash_password(DEMO_ADMIN_PASSWORD)
        .map_err(|err| Error::internal(format!("seeding the admin account failed: {err}")))?;
    store.create_user(NewUser {
        supplier_id: Some(admin_supplier.id),
        username: DEMO_ADMIN_USERNAME.into(),
        email: DEMO_ADMIN_EMAIL.into(),
        phone: Some("+31 20 000 0000".into()),
        password_hash,
        role: UserRole::Admin,
        is_active: true,
    });

    info!(
        docks = 2,
        days = DEMO_CALENDAR_DAYS,
        zone = %DEMO_ZONE,
        "seeded demo data"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::password::verify_password;
    use crate::test_support::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn seeded_store() -> PortalStore {
        let at = Utc
            .with_ymd_and_hms(2025, 3, 3, 9, 0, 0)
            .single()
            .expect("instant");
        let clock = Arc::new(FixedClock::new(at));
        let mut store = PortalStore::new(clock.clone());
        seed_demo_data(&mut store, clock.as_ref()).expect("seeding succeeds");
        store
    }

    #[test]
    fn seeding_creates_docks_and_a_full_first_day() {
        let store = seeded_store();
        assert_eq!(store.list_docks().len(), 2);
        let first_day = store
            .list_timeslots_by_date(
                chrono::NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date"),
            )
            .expect("summaries");
        // Two docks, 24 half-hour slots each.
        assert_eq!(first_day.len(), 48);
    }

    #[test]
    fn seeded_admin_can_be_verified() {
        let store = seeded_store();
        let admin = store
            .find_user_by_identifier(DEMO_ADMIN_USERNAME)
            .expect("admin exists");
        assert_eq!(admin.role, UserRole::Admin);
        assert!(
            verify_password(DEMO_ADMIN_PASSWORD, &admin.password_hash).expect("hash is valid")
        );
    }
}
