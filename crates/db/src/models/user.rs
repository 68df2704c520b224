//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sims_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// `token` is the user's current one-time shared key and `session_key` the
/// key consumed by the most recent exchange. Neither is serialized: holding
/// a user's key is enough to sign in as them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub pin: String,
    #[serde(skip_serializing)]
    pub token: String,
    #[serde(skip_serializing)]
    pub session_key: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. The caller supplies the initial key.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub pin: String,
    pub token: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub pin: Option<String>,
}
