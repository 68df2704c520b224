//! Handlers for user management and PIN changes.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sims_core::credential::generate_key;
use sims_core::error::CoreError;
use sims_core::types::DbId;
use sims_db::models::user::{CreateUser, UpdateUser, User};
use sims_db::repositories::UserRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::IdParams;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /addUser`. The first shared key is generated.
#[derive(Debug, Deserialize, Validate)]
pub struct AddUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 1, max = 32))]
    pub pin: String,
}

/// Request body for `PUT /updateUser/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub pin: Option<String>,
}

/// Request body for `PUT /changePin`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePinRequest {
    pub id: DbId,
    pub old_pin: String,
    #[validate(length(min = 1, max = 32))]
    pub new_pin: String,
}

/// Response body for `POST /addUser`: the user plus their first shared key.
///
/// This is the only response that carries a key; listings never do.
#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /getUsers
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// GET /getUser/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    fetch(&state, id).await
}

/// GET /getUser?id=
pub async fn get_by_query(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<IdParams>,
) -> AppResult<Json<User>> {
    fetch(&state, params.id).await
}

async fn fetch(state: &AppState, id: DbId) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(user))
}

/// POST /addUser
///
/// Creates the user with a freshly generated shared key, returned in `token`
/// so it can be handed to the new user for their first exchange.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<AddUserRequest>,
) -> AppResult<Json<CreatedUserResponse>> {
    input.validate()?;

    let create = CreateUser {
        first_name: input.first_name,
        last_name: input.last_name,
        pin: input.pin,
        token: generate_key(),
    };
    let user = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(user_id = user.id, created_by = auth.user_id, "User created");
    Ok(Json(CreatedUserResponse {
        token: user.token.clone(),
        user,
    }))
}

/// PUT /updateUser/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    input.validate()?;

    let update = UpdateUser {
        first_name: input.first_name,
        last_name: input.last_name,
        pin: input.pin,
    };
    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(user))
}

/// DELETE /deleteUser/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(user_not_found(id));
    }
    tracing::info!(user_id = id, deleted_by = auth.user_id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}

/// PUT /changePin
///
/// Replaces the PIN only when `old_pin` matches; the shared key is untouched.
pub async fn change_pin(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<ChangePinRequest>,
) -> AppResult<Json<MessageResponse>> {
    input.validate()?;

    let changed = UserRepo::change_pin(&state.pool, input.id, &input.old_pin, &input.new_pin).await?;
    if changed {
        tracing::info!(user_id = input.id, "PIN changed");
        return Ok(Json(MessageResponse::new("PIN changed")));
    }

    // Tell "no such user" apart from "wrong PIN".
    if UserRepo::find_by_id(&state.pool, input.id).await?.is_none() {
        return Err(user_not_found(input.id));
    }
    Err(AppError::Core(CoreError::Validation(
        "Old PIN does not match".into(),
    )))
}
