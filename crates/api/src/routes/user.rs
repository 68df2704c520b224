//! Route definitions for users.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// ```text
/// GET    /getUsers          -> list
/// GET    /getUser/{id}      -> get_by_id
/// GET    /getUser?id=       -> get_by_query
/// POST   /addUser           -> create
/// PUT    /updateUser/{id}   -> update
/// DELETE /deleteUser/{id}   -> delete
/// PUT    /changePin         -> change_pin
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getUsers", get(user::list))
        .route("/getUser", get(user::get_by_query))
        .route("/getUser/{id}", get(user::get_by_id))
        .route("/addUser", post(user::create))
        .route("/updateUser/{id}", put(user::update))
        .route("/deleteUser/{id}", delete(user::delete))
        .route("/changePin", put(user::change_pin))
}
