//! Login handler.

use crate::errors::AuthError;
use crate::models::{LoginRequest, TokenResponse};
use crate::routes::AppState;
use crate::services::login_service;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Handle password login
///
/// POST /api/v1/auth/login
///
/// ```json
/// {"email": "ada@example.com", "password": "..."}
/// ```
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let validator = &state.validator;

    let token = login_service::login(
        validator.store().as_ref(),
        validator.codec(),
        &payload.email,
        &payload.password,
    )
    .await?;

    Ok(Json(token))
}
