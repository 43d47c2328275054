//! Core portal entities and their creation/update inputs.
//!
//! All identifiers are process-local, sequential, 1-based integers issued by
//! the store. Wire names are camelCase to match the portal API contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Lifecycle status of a supplier account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SupplierStatus {
    /// Supplier can authenticate and book.
    Active,
    /// Supplier is disabled by an administrator.
    Inactive,
}

/// A supplier organisation that books dock timeslots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// Sequential identifier.
    pub id: i64,
    /// Display title of the organisation.
    pub title: String,
    /// Tax registration number, where supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
    /// Tax registration reason code, where supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kpp: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Lifecycle status.
    pub status: SupplierStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a supplier; the store assigns id, status, and timestamp.
#[derive(Debug, Clone, Default)]
pub struct NewSupplier {
    /// Display title of the organisation.
    pub title: String,
    /// Tax registration number.
    pub inn: Option<String>,
    /// Tax registration reason code.
    pub kpp: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Role attached to a portal account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// A user acting on behalf of a supplier.
    SupplierUser,
    /// A warehouse administrator.
    Admin,
}

/// A portal account, including the stored credential hash.
///
/// Never serialised to the wire directly; handlers project it through
/// [`PublicUser`] so the hash cannot leak.
#[derive(Debug, Clone, PartialEq)]
pub struct AppUser {
    /// Sequential identifier.
    pub id: i64,
    /// Owning supplier, absent for pure administrator accounts.
    pub supplier_id: Option<i64>,
    /// Unique login name (case-insensitive for lookups).
    pub username: String,
    /// Account email (case-insensitive for lookups).
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Argon2id PHC-format password hash.
    pub password_hash: String,
    /// Account role.
    pub role: UserRole,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Owning supplier, absent for administrator accounts.
    pub supplier_id: Option<i64>,
    /// Login name.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Argon2id PHC-format password hash.
    pub password_hash: String,
    /// Account role.
    pub role: UserRole,
    /// Whether the account may authenticate; defaults to true.
    pub is_active: bool,
}

/// Wire projection of [`AppUser`] with the password hash removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Sequential identifier.
    pub id: i64,
    /// Owning supplier, absent for administrator accounts.
    pub supplier_id: Option<i64>,
    /// Login name.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&AppUser> for PublicUser {
    fn from(user: &AppUser) -> Self {
        Self {
            id: user.id,
            supplier_id: user.supplier_id,
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// A loading dock, created only at seed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dock {
    /// Sequential identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Free-form location description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-form operational constraints (string keys, arbitrary values).
    #[schema(value_type = Object)]
    pub constraints: Map<String, Value>,
}

/// Input for creating a dock; the store assigns the id.
#[derive(Debug, Clone, Default)]
pub struct NewDock {
    /// Display title.
    pub title: String,
    /// Free-form location description.
    pub location: Option<String>,
    /// Free-form operational constraints.
    pub constraints: Map<String, Value>,
}

/// A vehicle declared for one booking; never reused across bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Sequential identifier.
    pub id: i64,
    /// Licence plate string.
    pub number_plate: String,
    /// Vehicle type, where declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    /// Load capacity, where declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
}

/// Input for creating a vehicle; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    /// Licence plate string.
    pub number_plate: String,
    /// Vehicle type.
    pub r#type: Option<String>,
    /// Load capacity.
    pub capacity: Option<i64>,
}

/// Explicit field-by-field contact update for a user.
///
/// Only fields carrying `Some` are applied; absent fields leave the stored
/// value untouched.
#[derive(Debug, Clone, Default)]
pub struct UserContactUpdate {
    /// Replacement account email.
    pub email: Option<String>,
    /// Replacement contact phone.
    pub phone: Option<String>,
}

impl UserContactUpdate {
    /// Merge the provided fields into `user`.
    pub fn apply(&self, user: &mut AppUser) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
    }
}

/// Explicit field-by-field contact update for a supplier.
#[derive(Debug, Clone, Default)]
pub struct SupplierContactUpdate {
    /// Replacement contact email.
    pub email: Option<String>,
    /// Replacement contact phone.
    pub phone: Option<String>,
    /// Replacement postal address.
    pub address: Option<String>,
}

impl SupplierContactUpdate {
    /// Merge the provided fields into `supplier`.
    pub fn apply(&self, supplier: &mut Supplier) {
        if let Some(email) = &self.email {
            supplier.email = Some(email.clone());
        }
        if let Some(phone) = &self.phone {
            supplier.phone = Some(phone.clone());
        }
        if let Some(address) = &self.address {
            supplier.address = Some(address.clone());
        }
    }
}
