//! Product model entity and DTOs.

use serde::{Deserialize, Serialize};
use sims_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::flag;

/// Raw row from the `models` table, before flag normalization.
#[derive(Debug, FromRow)]
pub(crate) struct ModelRow {
    pub id: DbId,
    pub name: String,
    pub brand: Option<String>,
    pub price: f64,
    pub picture_id: Option<String>,
    pub is_active: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product model (e.g. one shoe design) whose stock is tracked per size.
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    pub id: DbId,
    pub name: String,
    pub brand: Option<String>,
    pub price: f64,
    /// Stored file name of the model picture under the images directory.
    pub picture_id: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ModelRow> for Model {
    fn from(row: ModelRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            brand: row.brand,
            price: row.price,
            picture_id: row.picture_id,
            is_active: flag(row.is_active),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new model.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateModel {
    pub name: String,
    pub brand: Option<String>,
    pub price: f64,
}

/// DTO for updating an existing model. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateModel {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}
