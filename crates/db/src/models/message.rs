//! Message entity and DTOs.

use serde::Serialize;
use sims_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::flag;

/// Raw row from the `messages` table, before flag normalization.
#[derive(Debug, FromRow)]
pub(crate) struct MessageRow {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub content: String,
    pub is_read: i64,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            content: row.content,
            is_read: flag(row.is_read),
            created_at: row.created_at,
        }
    }
}

/// DTO for posting a message.
///
/// The author is `user_id` when given, which must name an existing user.
/// Otherwise it is `session_user_id`, recorded only while that user exists.
#[derive(Debug, Clone)]
pub struct CreateMessage {
    pub user_id: Option<DbId>,
    pub session_user_id: Option<DbId>,
    pub content: String,
}
