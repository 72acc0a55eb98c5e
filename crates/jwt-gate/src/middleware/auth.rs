//! Authentication middleware for protected routes.
//!
//! Extracts the Bearer token from the Authorization header, validates it with
//! the shared `TokenValidator`, and binds the resulting identity to the
//! request via extensions. The binding lives exactly as long as the request.

use crate::crypto::Claims;
use crate::errors::AuthError;
use crate::repositories::users::User;
use crate::services::token_validator::{Authenticated, TokenValidator};
use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::instrument;

/// State for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<TokenValidator>,
}

/// The authenticated identity of the current request.
///
/// Inserted by [`require_auth`]. Handlers take it as an extractor; on a route
/// without the middleware extraction fails with `NoIdentity`.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
    pub claims: Claims,
}

impl From<Authenticated> for AuthContext {
    fn from(authenticated: Authenticated) -> Self {
        Self {
            user: authenticated.user,
            claims: authenticated.claims,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AuthError::NoIdentity)
    }
}

/// Extract the bearer token from request headers.
///
/// The scheme is matched case-insensitively (`Bearer`, `bearer`, `BEARER`).
/// Returns `None` for a missing header, a non-Bearer scheme, a header that is
/// not visible ASCII, or an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    Some(token.trim()).filter(|token| !token.is_empty())
}

/// Authentication middleware that validates JWT tokens.
///
/// # Authorization Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// - 401 `No Token` if the credential is absent; the validator is not called
/// - 401 `Authentication Failed` if validation fails
/// - Continues to next handler with an [`AuthContext`] in extensions otherwise
#[instrument(skip_all, name = "jwt_gate.middleware.auth")]
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AuthError> {
    let token = extract_bearer_token(req.headers()).ok_or_else(|| {
        tracing::debug!(target: "jwt_gate.middleware.auth", "Missing bearer credential");
        AuthError::MissingCredential
    })?;

    let authenticated = state.validator.validate(token).await?;

    req.extensions_mut().insert(AuthContext::from(authenticated));

    Ok(next.run(req).await)
}
