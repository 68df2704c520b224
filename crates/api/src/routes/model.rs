//! Route definitions for product models.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::model;
use crate::state::AppState;

/// ```text
/// GET    /getModels          -> list (?include_inactive=)
/// POST   /addModel           -> create
/// PUT    /updateModel/{id}   -> update
/// DELETE /deleteModel/{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getModels", get(model::list))
        .route("/addModel", post(model::create))
        .route("/updateModel/{id}", put(model::update))
        .route("/deleteModel/{id}", delete(model::delete))
}
