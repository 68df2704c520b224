//! Repository for the `sizes` table.

use sims_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::size::{CreateSize, Size};

const COLUMNS: &str = "id, pid, size, stock";

/// Provides CRUD operations for per-model sizes and their stock.
pub struct SizeRepo;

impl SizeRepo {
    /// Insert a new size, returning the created row.
    ///
    /// Fails with a foreign-key violation if `pid` is not an existing model and
    /// with a unique violation if the model already has this size.
    pub async fn create(pool: &SqlitePool, input: &CreateSize) -> Result<Size, sqlx::Error> {
        let query = format!(
            "INSERT INTO sizes (pid, size, stock)
             VALUES (?, ?, COALESCE(?, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Size>(&query)
            .bind(input.pid)
            .bind(&input.size)
            .bind(input.stock)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Size>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sizes WHERE id = ?");
        sqlx::query_as::<_, Size>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every size, grouped by model.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Size>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sizes ORDER BY pid, id");
        sqlx::query_as::<_, Size>(&query).fetch_all(pool).await
    }

    /// List the sizes of one model.
    pub async fn list_by_model(pool: &SqlitePool, pid: DbId) -> Result<Vec<Size>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sizes WHERE pid = ? ORDER BY id");
        sqlx::query_as::<_, Size>(&query)
            .bind(pid)
            .fetch_all(pool)
            .await
    }

    /// Set the stock level of a size. Returns `None` if the size does not exist.
    pub async fn update_stock(
        pool: &SqlitePool,
        id: DbId,
        stock: i64,
    ) -> Result<Option<Size>, sqlx::Error> {
        let query = format!("UPDATE sizes SET stock = ? WHERE id = ? RETURNING {COLUMNS}");
        sqlx::query_as::<_, Size>(&query)
            .bind(stock)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a size. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sizes WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
