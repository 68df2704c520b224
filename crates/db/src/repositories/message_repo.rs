//! Repository for the `messages` table.

use sqlx::SqlitePool;

use crate::models::message::{CreateMessage, Message, MessageRow};

const COLUMNS: &str = "id, user_id, content, is_read, created_at";

pub struct MessageRepo;

impl MessageRepo {
    /// Insert a new message, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (user_id, content)
             VALUES (COALESCE(?, (SELECT id FROM users WHERE id = ?)), ?)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, MessageRow>(&query)
            .bind(input.user_id)
            .bind(input.session_user_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// List messages, newest first.
    pub async fn list(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query_as::<_, MessageRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Message::from).collect())
    }
}
