//! jwt-gate error types.
//!
//! Every variant is an expected outcome of authenticating a request, never a
//! process-fatal condition. The Display strings are the human-readable reasons
//! shown to clients; none of them carry key material. Internal failures are
//! logged server-side and returned as a generic message.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Value of the `WWW-Authenticate` header on 401 responses.
pub const WWW_AUTHENTICATE_VALUE: &str = "Bearer realm=\"jwt-gate\", error=\"invalid_token\"";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Structurally invalid token (wrong segment count, bad base64, bad JSON,
    /// missing claims, oversized).
    #[error("Invalid token")]
    MalformedToken,

    /// Signature does not verify under the configured secret, or the token
    /// names a different algorithm than the configured one.
    #[error("Invalid token")]
    SignatureInvalid,

    /// Signature is valid but `exp` has passed.
    #[error("Token has expired")]
    TokenExpired,

    /// Token is authentic but its subject matches no identity.
    #[error("Invalid user")]
    InvalidUser,

    /// No bearer credential on the request.
    #[error("Authorization token is required")]
    MissingCredential,

    /// No subject to resolve: the claim set lacks `sub`, or the identity was
    /// requested outside an authenticated request.
    #[error("Invalid user id")]
    NoIdentity,

    /// Login attempt with unknown email or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The identity store failed to answer.
    #[error("Identity store error: {0}")]
    IdentityStore(String),

    /// Token encoding failed.
    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// True for the kinds collapsed into "invalid token" by the baseline
    /// contract: malformed, bad signature, expired.
    pub fn is_invalid_token(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedToken | AuthError::SignatureInvalid | AuthError::TokenExpired
        )
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::IdentityStore(_) | AuthError::Signing(_) => 500,
            _ => 401,
        }
    }

    /// Bounded label for the `error_category` metric dimension.
    pub fn metric_label(&self) -> &'static str {
        match self {
            AuthError::MalformedToken => "malformed",
            AuthError::SignatureInvalid => "signature",
            AuthError::TokenExpired => "expired",
            AuthError::InvalidUser => "invalid_user",
            AuthError::MissingCredential => "missing_credential",
            AuthError::NoIdentity => "no_identity",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::IdentityStore(_) => "identity_store",
            AuthError::Signing(_) => "signing",
        }
    }
}

/// JSON error body: `{"error": ..., "message": ...}`.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let (error, message) = match &self {
            AuthError::MissingCredential => ("No Token", self.to_string()),
            AuthError::IdentityStore(err) | AuthError::Signing(err) => {
                // Log actual error server-side, return generic message to client
                tracing::error!(target: "jwt_gate.errors", error = %err, "Internal authentication failure");
                ("Internal Error", "An internal error occurred".to_string())
            }
            _ => ("Authentication Failed", self.to_string()),
        };

        let mut response = (status, Json(ErrorResponse { error, message })).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(WWW_AUTHENTICATE_VALUE),
            );
        }

        response
    }
}
