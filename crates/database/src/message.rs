//! Chat message persistence.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{Message, NewMessage};

/// Insert a chat turn, returning its row id.
pub async fn insert_message(pool: &SqlitePool, message: &NewMessage) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO messages (user_id, thread_id, role, content, agent_name)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&message.user_id)
    .bind(&message.thread_id)
    .bind(&message.role)
    .bind(&message.content)
    .bind(&message.agent_name)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// List a thread's messages in creation order.
pub async fn list_thread_messages(pool: &SqlitePool, thread_id: &str) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, user_id, thread_id, role, content, agent_name, created_at
        FROM messages
        WHERE thread_id = ?
        ORDER BY created_at, id
        "#,
    )
    .bind(thread_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Count messages in a thread.
pub async fn count_thread_messages(pool: &SqlitePool, thread_id: &str) -> Result<i64> {
    let count: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM messages
        WHERE thread_id = ?
        "#,
    )
    .bind(thread_id)
    .fetch_one(pool)
    .await?;

    Ok(count.0)
}
