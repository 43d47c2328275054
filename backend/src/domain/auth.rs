//! Registration and credential verification.
//!
//! Keep inbound payload parsing outside the domain: handlers validate raw
//! strings into [`LoginCredentials`] or [`Registration`] before touching the
//! store. Login failures collapse into one generic unauthorized error so
//! callers cannot probe which usernames exist.

use serde::Serialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::entities::{AppUser, NewSupplier, NewUser, Supplier, UserRole};
use crate::domain::error::Error;
use crate::domain::password::{hash_password, verify_password};
use crate::domain::store::PortalStore;
use crate::domain::token::CredentialError;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Identifier was missing or blank once trimmed.
    EmptyIdentifier,
    /// Password was blank.
    EmptyPassword,
}

impl std::fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyIdentifier => write!(f, "identifier must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `identifier` is trimmed and non-empty; it may be a username or email.
/// - `password` is non-empty but keeps caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    identifier: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw identifier/password inputs.
    pub fn try_from_parts(identifier: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = identifier.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyIdentifier);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            identifier: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Identifier string suitable for user lookups.
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated registration input for a new supplier account.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Supplier organisation title.
    pub supplier_title: String,
    /// Tax registration number.
    pub inn: Option<String>,
    /// Tax registration reason code.
    pub kpp: Option<String>,
    /// Supplier contact email.
    pub email: Option<String>,
    /// Supplier contact phone.
    pub phone: Option<String>,
    /// Supplier postal address.
    pub address: Option<String>,
    /// Login name for the account.
    pub username: String,
    /// Account email.
    pub account_email: String,
    /// Account contact phone.
    pub account_phone: Option<String>,
    /// Plaintext password; hashed before storage and zeroed on drop.
    pub password: Zeroizing<String>,
}

/// Authenticated identity returned by registration and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    /// Account id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Account role.
    pub role: UserRole,
    /// Owning supplier, where the account has one.
    pub supplier: Option<Supplier>,
}

impl AuthPayload {
    /// Project an account and its supplier into the session identity.
    pub fn from_user(user: &AppUser, supplier: Option<Supplier>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            supplier,
        }
    }
}

fn credential_failure(err: CredentialError) -> Error {
    Error::internal(format!("credential machinery failed: {err}"))
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid login or password")
}

/// Register a supplier and its first account.
///
/// Rejects with `conflict` when the username or the account email matches an
/// existing user's username or email case-insensitively; the check runs
/// before anything is persisted, so a rejected registration leaves no
/// partial supplier or user behind.
pub fn register(store: &mut PortalStore, registration: Registration) -> Result<AuthPayload, Error> {
    let duplicate = store
        .find_user_by_identifier(&registration.username)
        .is_some()
        || store
            .find_user_by_identifier(&registration.account_email)
            .is_some();
    if duplicate {
        return Err(Error::conflict(
            "a user with this username or email already exists",
        ));
    }

    let password_hash = hash_password(&registration.password).map_err(credential_failure)?;

    let supplier = store.create_supplier(NewSupplier {
        title: registration.supplier_title,
        inn: registration.inn,
        kpp: registration.kpp,
        email: registration.email,
        phone: registration.phone,
        address: registration.address,
    });
    let user = store.create_user(NewUser {
        supplier_id: Some(supplier.id),
        username: registration.username,
        email: registration.account_email,
        phone: registration.account_phone,
        password_hash,
        role: UserRole::SupplierUser,
        is_active: true,
    });

    Ok(AuthPayload::from_user(&user, Some(supplier)))
}

/// Verify a password against a candidate account looked up by identifier.
///
/// `candidate` is `None` when the identifier matched nothing; that case and a
/// hash mismatch return the same generic unauthorized error, so responses do
/// not reveal which usernames exist. The caller may verify outside any store
/// lock by passing a cloned record.
pub fn verify_credentials(candidate: Option<AppUser>, password: &str) -> Result<AppUser, Error> {
    let Some(user) = candidate else {
        return Err(invalid_credentials());
    };
    let matches = verify_password(password, &user.password_hash).map_err(credential_failure)?;
    if !matches {
        return Err(invalid_credentials());
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::test_support::FixedClock;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use std::sync::Arc;

    fn store() -> PortalStore {
        let now = Utc
            .with_ymd_and_hms(2025, 3, 3, 9, 0, 0)
            .single()
            .expect("instant");
        PortalStore::new(Arc::new(FixedClock::new(now)))
    }

    fn registration(username: &str, email: &str) -> Registration {
        Registration {
            supplier_title: "Acme Logistics".into(),
            inn: None,
            kpp: None,
            email: Some("office@acme.test".into()),
            phone: None,
            address: None,
            username: username.into(),
            account_email: email.into(),
            account_phone: None,
            password: Zeroizing::new("Secret#Pass1".into()),
        }
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyIdentifier)]
    #[case("   ", "pw", LoginValidationError::EmptyIdentifier)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_login_payloads_are_rejected(
        #[case] identifier: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(identifier, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn registration_creates_supplier_and_linked_user() {
        let mut portal = store();
        let payload =
            register(&mut portal, registration("acme", "ops@acme.test")).expect("register");
        assert_eq!(payload.role, UserRole::SupplierUser);
        let supplier = payload.supplier.expect("supplier linked");
        assert_eq!(supplier.title, "Acme Logistics");
        let stored = portal.find_user_by_id(payload.id).expect("user stored");
        assert_eq!(stored.supplier_id, Some(supplier.id));
        assert_ne!(stored.password_hash, "Secret#Pass1");
    }

    #[rstest]
    #[case("ACME", "fresh@other.test")]
    #[case("fresh", "OPS@ACME.TEST")]
    #[case("ops@acme.test", "fresh@other.test")]
    fn duplicate_identifiers_conflict_and_persist_nothing(
        #[case] username: &str,
        #[case] email: &str,
    ) {
        let mut portal = store();
        register(&mut portal, registration("acme", "ops@acme.test")).expect("first registration");

        let err = register(&mut portal, registration(username, email))
            .expect_err("duplicate must conflict");
        assert_eq!(err.code(), crate::domain::ErrorCode::Conflict);
        // Exactly the original supplier/user pair remains.
        assert!(portal.find_user_by_id(2).is_none());
        assert!(portal.find_supplier_by_id(2).is_none());
    }

    #[rstest]
    fn unknown_user_and_wrong_password_are_indistinguishable() {
        let mut portal = store();
        let payload =
            register(&mut portal, registration("acme", "ops@acme.test")).expect("register");
        let stored = portal.find_user_by_id(payload.id).cloned();

        let unknown = verify_credentials(None, "Secret#Pass1").expect_err("unknown user");
        let mismatch = verify_credentials(stored, "wrong-password").expect_err("wrong password");
        assert_eq!(unknown, mismatch);
    }

    #[rstest]
    fn valid_credentials_return_the_account() {
        let mut portal = store();
        let payload =
            register(&mut portal, registration("acme", "ops@acme.test")).expect("register");
        let stored = portal.find_user_by_id(payload.id).cloned();
        let user = verify_credentials(stored, "Secret#Pass1").expect("valid credentials");
        assert_eq!(user.id, payload.id);
    }
}
