//! Rotating shared-key exchange.
//!
//! A presented key is traded for a bearer token exactly once. The swap to a
//! fresh key is a single conditional update, so the key is consumed before
//! the token is handed out and concurrent exchanges of one key cannot both
//! succeed.

use sims_core::credential::{generate_replacement_key, MAX_ROTATION_ATTEMPTS};
use sims_core::error::CoreError;
use sims_db::models::user::User;
use sims_db::repositories::UserRepo;
use sims_db::DbPool;

use crate::auth::jwt::{generate_token, JwtConfig};
use crate::error::{AppError, AppResult};

/// A completed exchange: the user after rotation and their new bearer token.
#[derive(Debug)]
pub struct Exchanged {
    pub user: User,
    pub token: String,
}

/// Consume `presented` and issue a token for its owner.
///
/// A fresh key that happens to equal another user's current key trips the
/// unique constraint; up to [`MAX_ROTATION_ATTEMPTS`] keys are tried before
/// giving up with a conflict.
pub async fn exchange_key(
    pool: &DbPool,
    presented: &str,
    config: &JwtConfig,
) -> AppResult<Exchanged> {
    exchange_key_with(pool, presented, config, generate_replacement_key).await
}

/// [`exchange_key`] with the source of replacement keys supplied by the caller.
///
/// `next_key` receives the presented key and is called once per attempt.
pub async fn exchange_key_with(
    pool: &DbPool,
    presented: &str,
    config: &JwtConfig,
    mut next_key: impl FnMut(&str) -> String,
) -> AppResult<Exchanged> {
    for attempt in 1..=MAX_ROTATION_ATTEMPTS {
        let new_key = next_key(presented);

        let user = match UserRepo::exchange(pool, presented, &new_key).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                return Err(AppError::Core(CoreError::InvalidCredential(
                    "Key is invalid".into(),
                )))
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::warn!(attempt, "Generated key collided, retrying");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let token = generate_token(user.id, presented, config)
            .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

        tracing::info!(user_id = user.id, "Key exchanged");
        return Ok(Exchanged { user, token });
    }

    tracing::warn!(
        attempts = MAX_ROTATION_ATTEMPTS,
        "No unique replacement key found, presented key left in place"
    );
    Err(AppError::Core(CoreError::Conflict(
        "Could not allocate a unique replacement key".into(),
    )))
}
