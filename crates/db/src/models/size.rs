//! Size (per-model stock) entity and DTOs.

use serde::{Deserialize, Serialize};
use sims_core::types::DbId;
use sqlx::FromRow;

/// A size row from the `sizes` table. `pid` references `models.id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Size {
    pub id: DbId,
    pub pid: DbId,
    pub size: String,
    pub stock: i64,
}

/// DTO for adding a size to a model. Stock defaults to 0.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSize {
    pub pid: DbId,
    pub size: String,
    pub stock: Option<i64>,
}
