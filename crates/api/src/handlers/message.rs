//! Handlers for staff messages.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use sims_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use sims_core::types::DbId;
use sims_db::models::message::{CreateMessage, Message};
use sims_db::repositories::MessageRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::state::AppState;

/// Request body for `POST /addMessage`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddMessageRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
    /// Author; defaults to the authenticated user.
    pub user_id: Option<DbId>,
}

/// GET /getMessages
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Message>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);
    let messages = MessageRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(messages))
}

/// POST /addMessage
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<AddMessageRequest>,
) -> AppResult<Json<Message>> {
    input.validate()?;

    let create = CreateMessage {
        user_id: input.user_id,
        session_user_id: Some(auth.user_id),
        content: input.content,
    };
    let message = MessageRepo::create(&state.pool, &create).await?;
    Ok(Json(message))
}
