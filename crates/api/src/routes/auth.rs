//! Route definitions for key exchange.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST /registerKey  -> register_key (public)
/// GET  /testToken    -> test_token (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registerKey", post(auth::register_key))
        .route("/testToken", get(auth::test_token))
}
