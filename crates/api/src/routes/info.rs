use axum::routing::get;
use axum::Router;

use crate::handlers::info;
use crate::state::AppState;

/// `GET /getInfo -> get_info`
pub fn router() -> Router<AppState> {
    Router::new().route("/getInfo", get(info::get_info))
}
