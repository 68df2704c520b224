//! Handlers for sales transactions.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use sims_core::error::CoreError;
use sims_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use sims_core::types::DbId;
use sims_db::models::transaction::{CreateTransaction, Transaction};
use sims_db::repositories::{SaleOutcome, TransactionRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// Request body for `POST /addTransaction`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddTransactionRequest {
    pub model_id: DbId,
    pub size_id: DbId,
    #[validate(range(min = 1))]
    pub quantity: i64,
    /// Total price of the sale; defaults to `quantity * model price`.
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
}

/// GET /getTransactions
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Transaction>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);
    let sales = TransactionRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(sales))
}

/// POST /addTransaction
///
/// Records a sale by the authenticated user and takes the units out of stock.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<AddTransactionRequest>,
) -> AppResult<Json<Transaction>> {
    input.validate()?;

    let create = CreateTransaction {
        user_id: Some(auth.user_id),
        model_id: input.model_id,
        size_id: input.size_id,
        quantity: input.quantity,
        price: input.price,
    };

    match TransactionRepo::create_with_stock_decrement(&state.pool, &create).await? {
        SaleOutcome::Recorded(sale) => {
            tracing::info!(
                transaction_id = sale.id,
                size_id = input.size_id,
                quantity = sale.quantity,
                user_id = auth.user_id,
                "Sale recorded"
            );
            Ok(Json(sale))
        }
        SaleOutcome::UnknownSize => Err(AppError::Core(CoreError::NotFound {
            entity: "Size",
            id: input.size_id,
        })),
        SaleOutcome::InsufficientStock { available } => {
            Err(AppError::Core(CoreError::Conflict(format!(
                "Insufficient stock: requested {}, available {available}",
                input.quantity
            ))))
        }
    }
}
