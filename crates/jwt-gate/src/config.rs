//! jwt-gate configuration.
//!
//! Configuration is loaded once from environment variables at startup and is
//! immutable afterwards. The signing secret is held in a `SecretString` and
//! the database URL is redacted in Debug output.

use common::secret::SecretString;
use jsonwebtoken::Algorithm;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default server bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Signing secret used when `JWT_SECRET` is unset.
///
/// Only suitable for local development; a warning is logged when it is used.
pub const DEFAULT_JWT_SECRET: &str = "secret-key";

/// Default signing algorithm.
pub const DEFAULT_JWT_ALGORITHM: &str = "HS256";

/// Default issuer when neither `JWT_ISSUER` nor `APP_NAME` is set.
pub const DEFAULT_ISSUER: &str = "jwt-gate";

/// Default token lifetime in hours.
pub const DEFAULT_JWT_TTL_HOURS: u64 = 6;

/// Maximum token lifetime in hours (30 days).
pub const MAX_JWT_TTL_HOURS: u64 = 720;

/// Process-wide signing parameters.
///
/// Shared read-only across all concurrent validations. `Debug` is derived
/// because `SecretString` redacts itself.
#[derive(Debug, Clone)]
pub struct SigningConfig {
    /// HMAC key.
    pub secret: SecretString,

    /// The single algorithm used for signing and accepted for verification.
    pub algorithm: Algorithm,

    /// Value of the `iss` claim in issued tokens.
    pub issuer: String,

    /// Token lifetime (`exp - iat`).
    pub ttl: Duration,
}

impl SigningConfig {
    /// Build signing parameters with the given secret and issuer, using the
    /// default algorithm and lifetime.
    pub fn new(secret: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            secret: SecretString::from(secret.into()),
            algorithm: Algorithm::HS256,
            issuer: issuer.into(),
            ttl: Duration::from_secs(DEFAULT_JWT_TTL_HOURS * 3600),
        }
    }
}

/// Service configuration.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// PostgreSQL connection URL for the identity store.
    pub database_url: Option<String>,

    /// Token signing parameters.
    pub signing: SigningConfig,
}

/// Custom Debug implementation that redacts the database URL.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("signing", &self.signing)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("JWT_SECRET must not be empty")]
    EmptySecret,

    #[error("Unsupported JWT algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid JWT TTL configuration: {0}")]
    InvalidTtl(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let database_url = vars.get("DATABASE_URL").cloned();

        let signing = signing_from_vars(vars)?;

        Ok(Config {
            bind_address,
            database_url,
            signing,
        })
    }

    /// The database URL, required by the binary.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

fn signing_from_vars(vars: &HashMap<String, String>) -> Result<SigningConfig, ConfigError> {
    let secret = match vars.get("JWT_SECRET") {
        Some(value) if value.is_empty() => return Err(ConfigError::EmptySecret),
        Some(value) => value.clone(),
        None => {
            tracing::warn!(
                target: "jwt_gate.config",
                "JWT_SECRET is not set, falling back to the built-in development secret"
            );
            DEFAULT_JWT_SECRET.to_string()
        }
    };

    let algorithm_name = vars
        .get("JWT_ALGO")
        .map(String::as_str)
        .unwrap_or(DEFAULT_JWT_ALGORITHM);
    let algorithm = parse_algorithm(algorithm_name)?;

    let issuer = vars
        .get("JWT_ISSUER")
        .or_else(|| vars.get("APP_NAME"))
        .cloned()
        .unwrap_or_else(|| DEFAULT_ISSUER.to_string());

    // TTL is expressed in whole hours
    let ttl_hours = if let Some(value_str) = vars.get("JWT_TTL") {
        let value: u64 = value_str.parse().map_err(|e| {
            ConfigError::InvalidTtl(format!(
                "JWT_TTL must be a whole number of hours, got '{}': {}",
                value_str, e
            ))
        })?;

        if value == 0 {
            return Err(ConfigError::InvalidTtl(
                "JWT_TTL must be at least 1 hour".to_string(),
            ));
        }

        if value > MAX_JWT_TTL_HOURS {
            return Err(ConfigError::InvalidTtl(format!(
                "JWT_TTL must not exceed {} hours, got {}",
                MAX_JWT_TTL_HOURS, value
            )));
        }

        value
    } else {
        DEFAULT_JWT_TTL_HOURS
    };

    Ok(SigningConfig {
        secret: SecretString::from(secret),
        algorithm,
        issuer,
        ttl: Duration::from_secs(ttl_hours * 3600),
    })
}

/// Only HMAC algorithms are accepted: the secret is a shared symmetric key.
fn parse_algorithm(name: &str) -> Result<Algorithm, ConfigError> {
    match Algorithm::from_str(name) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(ConfigError::UnsupportedAlgorithm(name.to_string())),
    }
}
