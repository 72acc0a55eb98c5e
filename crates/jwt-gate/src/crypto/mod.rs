//! Token codec: claim set construction, HMAC signing and verification.
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (DoS prevention)
//! - Exactly one algorithm is accepted, fixed by configuration; the token
//!   header never selects the verification algorithm
//! - Expiry is NOT checked here; see `services::token_validator`
//! - The `sub` field in Claims is redacted in Debug output

use crate::config::SigningConfig;
use crate::errors::AuthError;
use crate::repositories::users::Identity;
use chrono::Utc;
use common::jwt::{extract_alg, validate_token_size};
use common::secret::ExposeSecret;
use common::types::UserId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// JWT Claims structure.
///
/// `sub` is optional on the wire so that a token without a subject still
/// decodes and is then rejected during identity resolution.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String, // Issuer (application name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<UserId>, // Subject (user id)
    pub iat: i64, // Issued at timestamp
    pub exp: i64, // Expiration timestamp
}

impl Claims {
    /// A claim set is expired once `exp` is at or before `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Custom Debug implementation that redacts the `sub` field.
impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("iss", &self.iss)
            .field("sub", &"[REDACTED]")
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .finish()
    }
}

/// Signs and verifies tokens under one immutable signing configuration.
///
/// Keys and the pinned `Validation` are built once; the codec holds no
/// mutable state and is shared freely across requests.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: Algorithm,
    issuer: String,
    ttl_seconds: i64,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(config: &SigningConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();

        let mut validation = Validation::new(config.algorithm);
        // Expiry is enforced by the validator against an explicit clock
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            algorithm: config.algorithm,
            issuer: config.issuer.clone(),
            ttl_seconds: i64::try_from(config.ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Token lifetime in seconds (`exp - iat` of issued tokens).
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Build the claim set for `identity` issued at `now`.
    pub fn claims_for(&self, identity: &impl Identity, now: i64) -> Claims {
        Claims {
            iss: self.issuer.clone(),
            sub: Some(identity.identity_id()),
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
        }
    }

    /// Issue a signed token for `identity`, valid from now for the configured ttl.
    pub fn issue(&self, identity: &impl Identity) -> Result<String, AuthError> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    /// Issue a signed token for `identity` as if the current time were `now`.
    #[instrument(skip_all)]
    pub fn issue_at(&self, identity: &impl Identity, now: i64) -> Result<String, AuthError> {
        let claims = self.claims_for(identity, now);
        self.sign(&claims)
    }

    /// Sign an arbitrary claim set with the configured algorithm and secret.
    #[instrument(skip_all)]
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(format!("JWT signing operation failed: {}", e)))
    }

    /// Verify a token's structure, algorithm and signature, and return its claims.
    ///
    /// Does not check expiry. Never panics on arbitrary input.
    ///
    /// # Errors
    ///
    /// - `MalformedToken` - oversized, wrong structure, bad base64/JSON, missing claims
    /// - `SignatureInvalid` - signature mismatch or a different algorithm than configured
    #[instrument(skip_all)]
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        validate_token_size(token).map_err(|_| AuthError::MalformedToken)?;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => {
                        tracing::debug!(target: "jwt_gate.crypto", "Token signature mismatch");
                        AuthError::SignatureInvalid
                    }
                    ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                        tracing::debug!(
                            target: "jwt_gate.crypto",
                            expected = ?self.algorithm,
                            presented = ?extract_alg(token).ok(),
                            "Token algorithm does not match configured algorithm"
                        );
                        AuthError::SignatureInvalid
                    }
                    _ => {
                        tracing::debug!(target: "jwt_gate.crypto", error = %e, "Token is malformed");
                        AuthError::MalformedToken
                    }
                }
            })?;

        Ok(token_data.claims)
    }
}
