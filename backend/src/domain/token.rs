//! Signed session token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the account id and role with a fixed
//! expiry. They prove an authenticated identity for a bounded window; no
//! server-side session state exists.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::UserRole;

/// Failures raised by credential and token handling.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Hashing or signing machinery failed.
    #[error("cryptographic failure: {0}")]
    Crypto(String),
    /// The token's expiry has passed.
    #[error("session token expired")]
    TokenExpired,
    /// The token failed signature or structural validation.
    #[error("invalid session token: {0}")]
    TokenInvalid(String),
}

/// JWT claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — account id.
    pub sub: i64,
    /// Account role at issue time.
    pub role: UserRole,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token id.
    pub jti: String,
}

/// Issues and verifies session tokens with a shared symmetric secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenIssuer {
    /// Build an issuer from the signing secret and a token lifetime.
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Token lifetime in seconds, also used for the cookie max-age.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a signed token for the given account.
    pub fn issue(&self, user_id: i64, role: UserRole) -> Result<String, CredentialError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id,
            role,
            iat: now,
            exp: now + self.ttl_secs,
            jti: Uuid::new_v4().to_string(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| CredentialError::Crypto(format!("JWT encode: {e}")))
    }

    /// Decode and verify a token's signature and expiry.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, CredentialError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => CredentialError::TokenExpired,
                _ => CredentialError::TokenInvalid(e.to_string()),
            })
    }
}
