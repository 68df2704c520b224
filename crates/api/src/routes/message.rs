use axum::routing::{get, post};
use axum::Router;

use crate::handlers::message;
use crate::state::AppState;

/// ```text
/// GET  /getMessages  -> list (?limit=&offset=)
/// POST /addMessage   -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getMessages", get(message::list))
        .route("/addMessage", post(message::create))
}
