//! Current user handler.
//!
//! Returns the identity bound to the request by the auth middleware.

use crate::middleware::AuthContext;
use axum::Json;
use serde::Serialize;
use tracing::instrument;

/// Response for `/api/v1/me` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    /// User id (the token's `sub`).
    pub id: i64,

    pub email: String,

    pub display_name: String,

    /// Token issuer.
    pub iss: String,

    /// Token issued-at timestamp.
    pub iat: i64,

    /// Token expiration timestamp.
    pub exp: i64,
}

impl From<AuthContext> for MeResponse {
    fn from(ctx: AuthContext) -> Self {
        Self {
            id: ctx.user.id.as_i64(),
            email: ctx.user.email,
            display_name: ctx.user.display_name,
            iss: ctx.claims.iss,
            iat: ctx.claims.iat,
            exp: ctx.claims.exp,
        }
    }
}

/// Handler for GET /api/v1/me
///
/// Requires valid authentication via the auth middleware.
///
/// ```json
/// {
///   "id": 42,
///   "email": "ada@example.com",
///   "display_name": "Ada",
///   "iss": "TestApp",
///   "iat": 1700000000,
///   "exp": 1700021600
/// }
/// ```
#[instrument(skip_all, name = "jwt_gate.handlers.me")]
pub async fn get_me(ctx: AuthContext) -> Json<MeResponse> {
    tracing::debug!(target: "jwt_gate.handlers.me", "Returning current identity");

    Json(MeResponse::from(ctx))
}
