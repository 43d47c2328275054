//! HTTP server configuration object and helpers.
//!
//! Configuration comes from the environment. The token secret is read from a
//! file so deployments can mount it as a secret; debug builds fall back to an
//! ephemeral secret with a warning.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;
use tracing::warn;
use uuid::Uuid;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SECRET_FILE: &str = "/var/run/secrets/portal_token_secret";
const DEFAULT_TOKEN_TTL_SECS: i64 = 8 * 60 * 60;

/// Errors raised while assembling the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bind address did not parse.
    #[error("invalid bind address {value}: {source}")]
    InvalidBindAddr {
        /// Raw environment value.
        value: String,
        /// Underlying parse error.
        #[source]
        source: std::net::AddrParseError,
    },
    /// The token TTL did not parse as a positive integer.
    #[error("invalid token TTL {value}")]
    InvalidTokenTtl {
        /// Raw environment value.
        value: String,
    },
    /// The token secret file could not be read in a release build.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        /// Path to the secret file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Runtime configuration for the HTTP server.
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// Symmetric token signing secret.
    pub token_secret: Zeroizing<Vec<u8>>,
    /// Session token lifetime in seconds.
    pub token_ttl_secs: i64,
    /// Whether to seed demo data at startup.
    pub seed_demo_data: bool,
}

impl ServerConfig {
    /// Assemble configuration from the process environment.
    ///
    /// Recognised variables: `PORTAL_BIND_ADDR`, `PORTAL_COOKIE_SECURE`
    /// (`0` disables), `PORTAL_TOKEN_SECRET_FILE`,
    /// `PORTAL_ALLOW_EPHEMERAL_SECRET` (`1` permits a generated secret in
    /// release builds), `PORTAL_TOKEN_TTL_SECS`, and `PORTAL_SEED_DEMO_DATA`
    /// (`0` disables).
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_raw = env::var("PORTAL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_raw,
                source,
            })?;

        let cookie_secure = env::var("PORTAL_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        let token_ttl_secs = match env::var("PORTAL_TOKEN_TTL_SECS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or(ConfigError::InvalidTokenTtl { value: raw })?,
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        let seed_demo_data = env::var("PORTAL_SEED_DEMO_DATA")
            .map(|v| v != "0")
            .unwrap_or(true);

        Ok(Self {
            bind_addr,
            cookie_secure,
            token_secret: read_token_secret()?,
            token_ttl_secs,
            seed_demo_data,
        })
    }
}

fn read_token_secret() -> Result<Zeroizing<Vec<u8>>, ConfigError> {
    let path =
        env::var("PORTAL_TOKEN_SECRET_FILE").unwrap_or_else(|_| DEFAULT_SECRET_FILE.into());
    match std::fs::read(&path) {
        Ok(bytes) => Ok(Zeroizing::new(bytes)),
        Err(source) => {
            let allow_dev =
                env::var("PORTAL_ALLOW_EPHEMERAL_SECRET").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %path, error = %source, "using ephemeral token secret (dev only)");
                let generated = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
                Ok(Zeroizing::new(generated.into_bytes()))
            } else {
                Err(ConfigError::SecretRead { path, source })
            }
        }
    }
}
