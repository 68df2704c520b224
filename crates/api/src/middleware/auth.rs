//! Bearer-token extractor guarding every endpoint except `/`, `/health`,
//! `/registerKey` and `/images`.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use sims_core::error::CoreError;
use sims_core::types::DbId;
use sims_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller behind a valid session token.
///
/// A missing or non-Bearer `Authorization` header is a 401; a token that
/// fails signature or expiry checks is a 403. With
/// `JwtConfig::verify_current_key` set, a token is also refused once its
/// user has exchanged a newer key, or no longer exists.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// `claims.sub`
    pub user_id: DbId,
    /// The shared key the token was issued for.
    pub key: String,
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}

fn forbidden(msg: &str) -> AppError {
    AppError::Core(CoreError::Forbidden(msg.to_string()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            forbidden("Invalid or expired token")
        })?;

        if state.config.jwt.verify_current_key {
            let current = UserRepo::find_by_id(&state.pool, claims.sub)
                .await?
                .and_then(|u| u.session_key);
            if current.as_deref() != Some(claims.key.as_str()) {
                tracing::debug!(user_id = claims.sub, jti = %claims.jti, "Superseded token");
                return Err(forbidden("Token has been superseded"));
            }
        }

        Ok(AuthUser {
            user_id: claims.sub,
            key: claims.key,
        })
    }
}
