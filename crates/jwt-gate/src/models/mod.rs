//! Request and response bodies.

use common::secret::SecretString;
use serde::{Deserialize, Serialize};

/// Login request body.
///
/// `password` is a `SecretString` so it is redacted if the request is logged.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

/// Token response (OAuth 2.0 style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
}
