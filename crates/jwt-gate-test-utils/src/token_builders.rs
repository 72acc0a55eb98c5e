//! Builder patterns for test tokens
//!
//! Signs claim sets directly with `jsonwebtoken`, independent of the
//! service's own codec, so tests can forge tokens the service would never
//! issue.

use crate::fixtures::{TEST_ISSUER, TEST_SECRET};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Map, Value};

/// Builder for signed test JWTs
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::new()
///     .for_user(42)
///     .expires_in(3600)
///     .sign();
/// ```
pub struct TestTokenBuilder {
    iss: String,
    sub: Option<i64>,
    iat: i64,
    exp: Option<i64>,
    algorithm: Algorithm,
    secret: String,
}

impl TestTokenBuilder {
    /// Create a new token builder with defaults
    ///
    /// Defaults match the test server: HS256, [`TEST_SECRET`], [`TEST_ISSUER`],
    /// subject 1, valid for one hour.
    pub fn new() -> Self {
        let now = Utc::now().timestamp();
        Self {
            iss: TEST_ISSUER.to_string(),
            sub: Some(1),
            iat: now,
            exp: Some(now + 3600),
            algorithm: Algorithm::HS256,
            secret: TEST_SECRET.to_string(),
        }
    }

    /// Set the subject (user id)
    pub fn for_user(mut self, id: i64) -> Self {
        self.sub = Some(id);
        self
    }

    /// Omit the `sub` claim
    pub fn without_subject(mut self) -> Self {
        self.sub = None;
        self
    }

    /// Omit the `exp` claim
    pub fn without_expiry(mut self) -> Self {
        self.exp = None;
        self
    }

    /// Set expiration in seconds from now (negative for the past)
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = Some(Utc::now().timestamp() + seconds);
        self
    }

    /// Expired one minute ago
    pub fn expired(self) -> Self {
        self.expires_in(-60)
    }

    /// Set issued-at timestamp
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.iat = timestamp;
        self
    }

    /// Set the issuer
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.iss = issuer.to_string();
        self
    }

    /// Sign with a different HMAC algorithm
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sign with a different secret
    pub fn with_secret(mut self, secret: &str) -> Self {
        self.secret = secret.to_string();
        self
    }

    /// Build the claims as a JSON value
    pub fn build(&self) -> Value {
        let mut claims = Map::new();
        claims.insert("iss".to_string(), json!(self.iss));
        if let Some(sub) = self.sub {
            claims.insert("sub".to_string(), json!(sub));
        }
        claims.insert("iat".to_string(), json!(self.iat));
        if let Some(exp) = self.exp {
            claims.insert("exp".to_string(), json!(exp));
        }
        Value::Object(claims)
    }

    /// Build and sign the token
    pub fn sign(self) -> String {
        encode(
            &Header::new(self.algorithm),
            &self.build(),
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .expect("HMAC signing should not fail")
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}
