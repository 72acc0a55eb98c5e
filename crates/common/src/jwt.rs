//! JWT utilities shared across jwt-gate crates.
//!
//! This module provides the pre-verification checks that run before any
//! signature work is done:
//! - Size limits for DoS prevention
//! - Algorithm extraction from JWT headers (for diagnostics only)
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing
//! - Nothing extracted here is trusted; the header `alg` is never used to
//!   choose a verification algorithm
//! - Error messages are generic to prevent information leakage
//!
//! # Usage
//!
//! ```rust,ignore
//! use common::jwt::{validate_token_size, extract_alg};
//!
//! validate_token_size(token)?;
//!
//! // After a verification failure, log what the client presented
//! if let Ok(alg) = extract_alg(token) {
//!     tracing::debug!(alg = %alg, "Token presented unexpected algorithm");
//! }
//! ```

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed JWT size in bytes (8KB).
///
/// JWTs larger than this are rejected BEFORE any base64 decoding or HMAC
/// computation. A typical HS256 token issued by jwt-gate is under 250 bytes.
pub const MAX_JWT_SIZE_BYTES: usize = 8192; // 8KB

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during pre-verification token checks.
///
/// Note: Error messages are intentionally generic to prevent information leakage.
/// Detailed information is logged at debug level for troubleshooting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtValidationError {
    /// Token size exceeds maximum allowed.
    #[error("The access token is invalid")]
    TokenTooLarge,

    /// Token format is invalid (not a valid JWT structure).
    #[error("The access token is invalid")]
    MalformedToken,

    /// Token header has no `alg` field.
    #[error("The access token is invalid")]
    MissingAlg,
}

// =============================================================================
// Functions
// =============================================================================

/// Reject tokens larger than [`MAX_JWT_SIZE_BYTES`].
///
/// # Errors
///
/// Returns `JwtValidationError::TokenTooLarge` if the token exceeds the limit.
pub fn validate_token_size(token: &str) -> Result<(), JwtValidationError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtValidationError::TokenTooLarge);
    }

    Ok(())
}

/// Extract the `alg` header value from a JWT without verifying the signature.
///
/// Used to explain verification failures in debug logs (e.g. a client
/// presenting an HS512 token to a service pinned to HS256).
///
/// # Security
///
/// - Token size is checked BEFORE any parsing
/// - This function does NOT validate the token
/// - The returned value MUST NOT be used to select the verification algorithm
///
/// # Errors
///
/// Returns `JwtValidationError` variants:
/// - `TokenTooLarge` - Token exceeds size limit
/// - `MalformedToken` - Token format invalid (wrong structure, bad base64, invalid JSON)
/// - `MissingAlg` - Token header missing `alg` field or `alg` is not a string
pub fn extract_alg(token: &str) -> Result<String, JwtValidationError> {
    validate_token_size(token)?;

    // JWT format: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        tracing::debug!(
            target: "common.jwt",
            parts = parts.len(),
            "Token rejected: invalid JWT format"
        );
        return Err(JwtValidationError::MalformedToken);
    }

    let header_part = parts.first().ok_or(JwtValidationError::MalformedToken)?;
    let header_bytes = URL_SAFE_NO_PAD.decode(header_part).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to decode JWT header base64");
        JwtValidationError::MalformedToken
    })?;

    let header: serde_json::Value = serde_json::from_slice(&header_bytes).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to parse JWT header JSON");
        JwtValidationError::MalformedToken
    })?;

    header
        .get("alg")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .ok_or(JwtValidationError::MissingAlg)
}
