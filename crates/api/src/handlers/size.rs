//! Handlers for per-model sizes and stock levels.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use sims_core::error::CoreError;
use sims_core::types::DbId;
use sims_db::models::size::{CreateSize, Size};
use sims_db::repositories::SizeRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::SizeFilterParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for `POST /addSize`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddSizeRequest {
    pub pid: DbId,
    #[validate(length(min = 1, max = 20))]
    pub size: String,
    #[validate(range(min = 0))]
    pub stock: Option<i64>,
}

/// Request body for `PUT /updateStock/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStockRequest {
    #[validate(range(min = 0))]
    pub stock: i64,
}

fn size_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Size", id })
}

/// GET /getSizes
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SizeFilterParams>,
) -> AppResult<Json<Vec<Size>>> {
    let sizes = match params.pid {
        Some(pid) => SizeRepo::list_by_model(&state.pool, pid).await?,
        None => SizeRepo::list(&state.pool).await?,
    };
    Ok(Json(sizes))
}

/// POST /addSize
///
/// An unknown `pid` is a 400 and a size the model already has is a 409.
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<AddSizeRequest>,
) -> AppResult<Json<Size>> {
    input.validate()?;

    let create = CreateSize {
        pid: input.pid,
        size: input.size,
        stock: input.stock,
    };
    let size = SizeRepo::create(&state.pool, &create).await?;
    Ok(Json(size))
}

/// PUT /updateStock/{id}
pub async fn update_stock(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStockRequest>,
) -> AppResult<Json<Size>> {
    input.validate()?;

    let size = SizeRepo::update_stock(&state.pool, id, input.stock)
        .await?
        .ok_or_else(|| size_not_found(id))?;
    tracing::info!(size_id = id, stock = size.stock, user_id = auth.user_id, "Stock set");
    Ok(Json(size))
}

/// DELETE /deleteSize/{id}
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !SizeRepo::delete(&state.pool, id).await? {
        return Err(size_not_found(id));
    }
    Ok(Json(MessageResponse::new("Size deleted")))
}
