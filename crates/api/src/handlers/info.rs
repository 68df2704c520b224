//! Handler for the inventory statistics roll-up.

use axum::extract::State;
use axum::Json;
use sims_core::stats::{build_info, InfoModel};
use sims_db::repositories::InfoRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /getInfo
///
/// The four statistics queries are independent and run concurrently.
pub async fn get_info(State(state): State<AppState>, _auth: AuthUser) -> AppResult<Json<InfoModel>> {
    let pool = &state.pool;
    let (models, sizes, sales, totals) = tokio::try_join!(
        InfoRepo::models(pool),
        InfoRepo::sizes(pool),
        InfoRepo::size_sales(pool),
        InfoRepo::sales_totals(pool),
    )?;

    Ok(Json(build_info(models, sizes, sales, totals)))
}
