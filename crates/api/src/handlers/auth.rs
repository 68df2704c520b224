//! Handlers for key exchange and token checks.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use sims_core::types::DbId;
use validator::Validate;

use crate::auth::exchange::exchange_key;
use crate::error::AppResult;
use crate::extract::JsonOrForm;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /registerKey`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterKeyRequest {
    #[validate(length(min = 1, message = "key must not be empty"))]
    pub key: String,
}

/// Successful exchange response.
#[derive(Debug, Serialize)]
pub struct RegisterKeyResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub pin: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn root() -> &'static str {
    "SIMS Server"
}

/// POST /registerKey
///
/// Trade a one-time shared key for a bearer token. The presented key is
/// replaced before the response is sent. The body may be JSON or a
/// urlencoded form (`key=...`).
pub async fn register_key(
    State(state): State<AppState>,
    JsonOrForm(input): JsonOrForm<RegisterKeyRequest>,
) -> AppResult<Json<RegisterKeyResponse>> {
    input.validate()?;

    let jwt = &state.config.jwt;
    let exchanged = exchange_key(&state.pool, &input.key, jwt).await?;
    let user = exchanged.user;

    Ok(Json(RegisterKeyResponse {
        token: exchanged.token,
        expires_in: jwt.token_expiry_secs,
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        pin: user.pin,
    }))
}

/// GET /testToken
pub async fn test_token(auth: AuthUser) -> &'static str {
    tracing::debug!(user_id = auth.user_id, "Token check");
    "Token is valid"
}
