//! Shared HTTP adapter state.
//!
//! Handlers receive the store and token issuer via `actix_web::web::Data`.
//! The store is an explicit object behind a mutex handle — the coarse lock
//! serialises every check-then-act sequence in the allocator, so capacity and
//! uniqueness checks cannot race each other.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{Error, PortalStore, TokenIssuer};

/// Handle to the portal store shared across workers.
pub type SharedStore = Arc<Mutex<PortalStore>>;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Shared entity store.
    pub store: SharedStore,
    /// Session token issuer/verifier.
    pub tokens: TokenIssuer,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl HttpState {
    /// Wrap a store and issuer into handler state.
    pub fn new(store: PortalStore, tokens: TokenIssuer, cookie_secure: bool) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            tokens,
            cookie_secure,
        }
    }

    /// Acquire the store lock, surfacing poisoning as an internal error.
    pub fn lock_store(&self) -> Result<MutexGuard<'_, PortalStore>, Error> {
        self.store
            .lock()
            .map_err(|_| Error::internal("portal store lock poisoned"))
    }
}
