//! Repository for the `models` table.

use sims_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::model::{CreateModel, Model, ModelRow, UpdateModel};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, brand, price, picture_id, is_active, created_at, updated_at";

/// Provides CRUD operations for product models.
pub struct ModelRepo;

impl ModelRepo {
    /// Insert a new model, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateModel) -> Result<Model, sqlx::Error> {
        let query = format!(
            "INSERT INTO models (name, brand, price)
             VALUES (?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ModelRow>(&query)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(input.price)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Find a model by its internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Model>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM models WHERE id = ?");
        let row = sqlx::query_as::<_, ModelRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Model::from))
    }

    /// List models ordered by name. Inactive models are skipped unless requested.
    pub async fn list(pool: &SqlitePool, include_inactive: bool) -> Result<Vec<Model>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM models
             WHERE is_active = 1 OR ?
             ORDER BY name, id"
        );
        let rows = sqlx::query_as::<_, ModelRow>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Model::from).collect())
    }

    /// Update a model. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateModel,
    ) -> Result<Option<Model>, sqlx::Error> {
        let query = format!(
            "UPDATE models SET
                name = COALESCE(?, name),
                brand = COALESCE(?, brand),
                price = COALESCE(?, price),
                is_active = COALESCE(?, is_active)
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ModelRow>(&query)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(input.price)
            .bind(input.is_active.map(i64::from))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Model::from))
    }

    /// Swap the model's picture to `picture_id`, but only while its current
    /// picture is still `expected`.
    ///
    /// Returns `false` when the model is gone or another upload got there
    /// first; the caller re-reads and retries.
    pub async fn replace_picture(
        pool: &SqlitePool,
        id: DbId,
        expected: Option<&str>,
        picture_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE models SET picture_id = ? WHERE id = ? AND picture_id IS ?")
                .bind(picture_id)
                .bind(id)
                .bind(expected)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a model and (by cascade) its sizes.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM models WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
