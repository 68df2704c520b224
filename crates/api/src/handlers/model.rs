//! Handlers for product models.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use sims_core::error::CoreError;
use sims_core::types::DbId;
use sims_db::models::model::{CreateModel, Model, UpdateModel};
use sims_db::repositories::ModelRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::IncludeInactiveParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for `POST /addModel`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddModelRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 200))]
    pub brand: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// Request body for `PUT /updateModel/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateModelRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    pub brand: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub is_active: Option<bool>,
}

fn model_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Model", id })
}

/// GET /getModels
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<Vec<Model>>> {
    let models = ModelRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(models))
}

/// POST /addModel
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<AddModelRequest>,
) -> AppResult<Json<Model>> {
    input.validate()?;

    let create = CreateModel {
        name: input.name,
        brand: input.brand,
        price: input.price,
    };
    let model = ModelRepo::create(&state.pool, &create).await?;
    Ok(Json(model))
}

/// PUT /updateModel/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateModelRequest>,
) -> AppResult<Json<Model>> {
    input.validate()?;

    let update = UpdateModel {
        name: input.name,
        brand: input.brand,
        price: input.price,
        is_active: input.is_active,
    };
    let model = ModelRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| model_not_found(id))?;
    Ok(Json(model))
}

/// DELETE /deleteModel/{id}
///
/// Sizes of the model are removed with it; recorded sales keep their rows.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ModelRepo::delete(&state.pool, id).await? {
        return Err(model_not_found(id));
    }
    Ok(Json(MessageResponse::new("Model deleted")))
}
