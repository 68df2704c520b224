//! Repository for the `users` table (the credential store).

use sims_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, pin, token, session_key, created_at, updated_at";

/// Provides CRUD operations for users plus the key-rotation primitives.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (first_name, last_name, pin, token)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.pin)
            .bind(&input.token)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the user whose current shared key equals `key`.
    pub async fn find_by_token(pool: &SqlitePool, key: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE token = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by id.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                pin = COALESCE(?, pin)
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.pin)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a user. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unconditionally replace a user's shared key. Returns `true` if the row was updated.
    pub async fn rotate_token(
        pool: &SqlitePool,
        id: DbId,
        new_key: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET token = ? WHERE id = ?")
            .bind(new_key)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Consume `presented` and install `new_key` in one conditional update.
    ///
    /// The `WHERE token = ?` guard makes this a compare-and-swap: of any number
    /// of concurrent calls presenting the same key, exactly one matches a row.
    /// The consumed key is kept in `session_key`. Returns the updated row, or
    /// `None` when no user currently holds `presented`.
    pub async fn exchange(
        pool: &SqlitePool,
        presented: &str,
        new_key: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET token = ?, session_key = ?
             WHERE token = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(new_key)
            .bind(presented)
            .bind(presented)
            .fetch_optional(pool)
            .await
    }

    /// Replace the PIN only if `old_pin` matches the stored one.
    ///
    /// Returns `true` if the PIN was changed; `false` means either the user
    /// does not exist or `old_pin` did not match.
    pub async fn change_pin(
        pool: &SqlitePool,
        id: DbId,
        old_pin: &str,
        new_pin: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET pin = ? WHERE id = ? AND pin = ?")
            .bind(new_pin)
            .bind(id)
            .bind(old_pin)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
