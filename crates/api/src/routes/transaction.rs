//! Route definitions for sales.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::transaction;
use crate::state::AppState;

/// ```text
/// GET  /getTransactions  -> list (?limit=&offset=)
/// POST /addTransaction   -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getTransactions", get(transaction::list))
        .route("/addTransaction", post(transaction::create))
}
