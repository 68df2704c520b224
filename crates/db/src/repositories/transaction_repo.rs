//! Repository for the `transactions` table (sales).

use sims_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::transaction::{CreateTransaction, Transaction};

const COLUMNS: &str = "id, user_id, model_id, size_id, quantity, price, created_at";

/// Result of attempting to record a sale.
#[derive(Debug)]
pub enum SaleOutcome {
    /// Stock was decremented and the sale inserted.
    Recorded(Transaction),
    /// No size with this id belongs to the given model.
    UnknownSize,
    /// The size exists but holds fewer units than requested.
    InsufficientStock { available: i64 },
}

/// Provides sale recording and listing.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Decrement stock and insert the sale in one database transaction.
    ///
    /// The stock update runs first and only succeeds while `stock >= quantity`,
    /// so concurrent sales can never drive stock negative. When no price is
    /// given the total is `quantity * models.price`. A seller whose user row
    /// is gone is recorded as NULL. Nothing is written unless the outcome is
    /// [`SaleOutcome::Recorded`].
    pub async fn create_with_stock_decrement(
        pool: &SqlitePool,
        input: &CreateTransaction,
    ) -> Result<SaleOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let decremented = sqlx::query(
            "UPDATE sizes SET stock = stock - ?
             WHERE id = ? AND pid = ? AND stock >= ?",
        )
        .bind(input.quantity)
        .bind(input.size_id)
        .bind(input.model_id)
        .bind(input.quantity)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            let available: Option<i64> =
                sqlx::query_scalar("SELECT stock FROM sizes WHERE id = ? AND pid = ?")
                    .bind(input.size_id)
                    .bind(input.model_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            tx.rollback().await?;
            tracing::debug!(
                size_id = input.size_id,
                model_id = input.model_id,
                quantity = input.quantity,
                ?available,
                "Sale rejected"
            );
            return Ok(match available {
                Some(available) => SaleOutcome::InsufficientStock { available },
                None => SaleOutcome::UnknownSize,
            });
        }

        let price = match input.price {
            Some(price) => price,
            None => {
                let unit: f64 = sqlx::query_scalar("SELECT price FROM models WHERE id = ?")
                    .bind(input.model_id)
                    .fetch_one(&mut *tx)
                    .await?;
                unit * input.quantity as f64
            }
        };

        let query = format!(
            "INSERT INTO transactions (user_id, model_id, size_id, quantity, price)
             VALUES ((SELECT id FROM users WHERE id = ?), ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let sale = sqlx::query_as::<_, Transaction>(&query)
            .bind(input.user_id)
            .bind(input.model_id)
            .bind(input.size_id)
            .bind(input.quantity)
            .bind(price)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(SaleOutcome::Recorded(sale))
    }

    /// List sales, newest first.
    pub async fn list(
        pool: &SqlitePool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Find a sale by id.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transactions WHERE id = ?");
        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
