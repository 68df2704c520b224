//! Sales transaction entity and DTOs.

use serde::Serialize;
use sims_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `transactions` table.
///
/// The foreign keys are nullable: deleting a user, model, or size keeps the
/// sale on record with the reference cleared.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub model_id: Option<DbId>,
    pub size_id: Option<DbId>,
    pub quantity: i64,
    /// Total price of the sale (not per unit).
    pub price: f64,
    pub created_at: Timestamp,
}

/// DTO for recording a sale.
#[derive(Debug, Clone)]
pub struct CreateTransaction {
    /// Seller. Stored as NULL when this user no longer exists.
    pub user_id: Option<DbId>,
    pub model_id: DbId,
    pub size_id: DbId,
    pub quantity: i64,
    /// Total price; `None` means `quantity * models.price`.
    pub price: Option<f64>,
}
