//! Bearer token generation and validation.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. A token is
//! issued once per successful key exchange and embeds the key that was
//! presented, so strict verification can tie it back to that exchange.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sims_core::types::DbId;
use uuid::Uuid;

use crate::config::env_or;

/// JWT claims embedded in every bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The shared key presented in the exchange that produced this token.
    pub key: String,
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4) for audit logs.
    pub jti: String,
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in seconds (default: 14 days).
    pub token_expiry_secs: i64,
    /// When set, a token is only accepted while its key is still the one most
    /// recently exchanged by its user.
    pub verify_current_key: bool,
}

/// Default token lifetime: 14 days.
const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 14 * 24 * 60 * 60;

impl JwtConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default   |
    /// |----------------------------|----------|-----------|
    /// | `TOKEN_SECRET`             | **yes**  | --        |
    /// | `TOKEN_EXPIRY_SECS`        | no       | `1209600` |
    /// | `TOKEN_VERIFY_CURRENT_KEY` | no       | `false`   |
    ///
    /// # Panics
    ///
    /// Panics if `TOKEN_SECRET` is not set or is empty, or if another
    /// variable does not parse.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "TOKEN_SECRET must not be empty");

        Self {
            secret,
            token_expiry_secs: env_or("TOKEN_EXPIRY_SECS", DEFAULT_TOKEN_EXPIRY_SECS),
            verify_current_key: env_or("TOKEN_VERIFY_CURRENT_KEY", false),
        }
    }
}

/// Generate an HS256 token for `user_id`, embedding the exchanged `key`.
pub fn generate_token(
    user_id: DbId,
    key: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        key: key.to_string(),
        sub: user_id,
        iat: now,
        exp: now + config.token_expiry_secs,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Checks the HS256 signature and `exp`. There is no clock leeway: a token
/// is refused from the second it expires.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
