//! Token validation: decode, expiry check, identity resolution.
//!
//! Each call is independent. The decoded claim set and the resolved user are
//! returned to the caller; nothing survives the call.

use crate::crypto::{Claims, TokenCodec};
use crate::errors::AuthError;
use crate::observability::record_token_validation;
use crate::repositories::users::{IdentityStore, User};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Outcome of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    /// The identity named by `sub`, fetched during this validation.
    pub user: User,
    /// The verified claim set.
    pub claims: Claims,
}

/// Validates bearer tokens against the signing configuration and the
/// identity store.
pub struct TokenValidator {
    codec: TokenCodec,
    store: Arc<dyn IdentityStore>,
}

impl TokenValidator {
    pub fn new(codec: TokenCodec, store: Arc<dyn IdentityStore>) -> Self {
        Self { codec, store }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn store(&self) -> &Arc<dyn IdentityStore> {
        &self.store
    }

    /// Validate `token` at the current time.
    pub async fn validate(&self, token: &str) -> Result<Authenticated, AuthError> {
        self.validate_at(token, Utc::now().timestamp()).await
    }

    /// Validate `token` as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// - `MalformedToken` / `SignatureInvalid` - see [`TokenCodec::decode`]
    /// - `TokenExpired` - `exp <= now`
    /// - `NoIdentity` - claim set has no `sub`
    /// - `InvalidUser` - `sub` matches no user
    /// - `IdentityStore` - the store failed to answer
    #[instrument(skip_all)]
    pub async fn validate_at(&self, token: &str, now: i64) -> Result<Authenticated, AuthError> {
        let start = Instant::now();
        let result = self.run_validation(token, now).await;
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                record_token_validation("success", None, duration);
                tracing::debug!(target: "jwt_gate.services.validator", "Token validated successfully");
            }
            Err(e) => {
                record_token_validation("error", Some(e.metric_label()), duration);
                tracing::debug!(
                    target: "jwt_gate.services.validator",
                    error_category = e.metric_label(),
                    invalid_token = e.is_invalid_token(),
                    "Token validation failed"
                );
            }
        }

        result
    }

    async fn run_validation(&self, token: &str, now: i64) -> Result<Authenticated, AuthError> {
        let claims = self.codec.decode(token)?;

        if claims.is_expired_at(now) {
            return Err(AuthError::TokenExpired);
        }

        let user = self.resolve_identity(&claims).await?;

        Ok(Authenticated { user, claims })
    }

    /// Look up the user named by the claim set's `sub`.
    ///
    /// Always queries the store; results are never cached.
    pub async fn resolve_identity(&self, claims: &Claims) -> Result<User, AuthError> {
        let id = claims.sub.ok_or(AuthError::NoIdentity)?;

        match self.store.find_by_id(id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                tracing::debug!(target: "jwt_gate.services.validator", user_id = %id, "Token subject not found");
                Err(AuthError::InvalidUser)
            }
            Err(e) => {
                tracing::error!(target: "jwt_gate.services.validator", error = %e, "Identity lookup failed");
                Err(e)
            }
        }
    }
}
