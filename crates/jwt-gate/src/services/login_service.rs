//! Password login: verifies credentials and issues a token.

use crate::crypto::TokenCodec;
use crate::errors::AuthError;
use crate::models::TokenResponse;
use crate::observability::record_token_issuance;
use crate::repositories::users::IdentityStore;
use common::secret::{ExposeSecret, SecretString};
use tracing::instrument;

/// Verified against when the email is unknown, so both paths cost one bcrypt check.
const DUMMY_BCRYPT_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5GyYqExt7YD3a";

/// Authenticate `email`/`password` against the identity store and issue a token.
///
/// Unknown email and wrong password both return `InvalidCredentials`.
#[instrument(skip_all)]
pub async fn login(
    store: &dyn IdentityStore,
    codec: &TokenCodec,
    email: &str,
    password: &SecretString,
) -> Result<TokenResponse, AuthError> {
    let user = store.find_by_email(email).await?;

    let hash_to_verify = match &user {
        Some(u) => u.password_hash.as_str(),
        None => DUMMY_BCRYPT_HASH,
    };

    let is_valid = bcrypt::verify(password.expose_secret(), hash_to_verify).unwrap_or_else(|e| {
        tracing::error!(target: "jwt_gate.services.login", error = %e, "Stored password hash is unreadable");
        false
    });

    let user = match user {
        Some(u) if is_valid => u,
        _ => {
            record_token_issuance("error");
            tracing::debug!(target: "jwt_gate.services.login", "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }
    };

    let access_token = codec.issue(&user).inspect_err(|e| {
        record_token_issuance("error");
        tracing::error!(target: "jwt_gate.services.login", error = %e, "Token issuance failed");
    })?;

    record_token_issuance("success");
    tracing::info!(target: "jwt_gate.services.login", user_id = %user.id, "Token issued");

    Ok(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(codec.ttl_seconds()).unwrap_or_default(),
    })
}
