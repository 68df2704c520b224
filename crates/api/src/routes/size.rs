//! Route definitions for sizes and stock.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::size;
use crate::state::AppState;

/// ```text
/// GET    /getSizes           -> list (?pid=)
/// POST   /addSize            -> create
/// PUT    /updateStock/{id}   -> update_stock
/// DELETE /deleteSize/{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getSizes", get(size::list))
        .route("/addSize", post(size::create))
        .route("/updateStock/{id}", put(size::update_stock))
        .route("/deleteSize/{id}", delete(size::delete))
}
