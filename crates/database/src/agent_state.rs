//! Per-(user, agent) state storage.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::AgentState;

/// Create or update an agent's state blob for a user.
pub async fn upsert_state(
    pool: &SqlitePool,
    user_id: &str,
    agent_name: &str,
    state_data: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO agent_state (user_id, agent_name, state_data)
        VALUES (?, ?, ?)
        ON CONFLICT(user_id, agent_name) DO UPDATE SET
            state_data = excluded.state_data,
            updated_at = datetime('now')
        "#,
    )
    .bind(user_id)
    .bind(agent_name)
    .bind(state_data)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get an agent's state for a user, if any.
pub async fn get_state(
    pool: &SqlitePool,
    user_id: &str,
    agent_name: &str,
) -> Result<Option<AgentState>> {
    let record = sqlx::query_as::<_, AgentState>(
        r#"
        SELECT user_id, agent_name, state_data, updated_at
        FROM agent_state
        WHERE user_id = ? AND agent_name = ?
        "#,
    )
    .bind(user_id)
    .bind(agent_name)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Clear an agent's state for a user.
pub async fn clear_state(pool: &SqlitePool, user_id: &str, agent_name: &str) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM agent_state
        WHERE user_id = ? AND agent_name = ?
        "#,
    )
    .bind(user_id)
    .bind(agent_name)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_user, test_db};

    #[tokio::test]
    async fn test_upsert_and_get_state() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        upsert_state(db.pool(), &user.id, "mail", r#"{"thread":"t1"}"#)
            .await
            .unwrap();

        let state = get_state(db.pool(), &user.id, "mail").await.unwrap().unwrap();
        assert_eq!(state.state_data, r#"{"thread":"t1"}"#);
    }

    #[tokio::test]
    async fn test_upsert_replaces_state() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        upsert_state(db.pool(), &user.id, "mail", r#"{"n":1}"#)
            .await
            .unwrap();
        upsert_state(db.pool(), &user.id, "mail", r#"{"n":2}"#)
            .await
            .unwrap();

        let state = get_state(db.pool(), &user.id, "mail").await.unwrap().unwrap();
        assert_eq!(state.state_data, r#"{"n":2}"#);
    }

    #[tokio::test]
    async fn test_state_per_agent() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        upsert_state(db.pool(), &user.id, "mail", r#"{"a":1}"#)
            .await
            .unwrap();
        upsert_state(db.pool(), &user.id, "cal", r#"{"b":2}"#)
            .await
            .unwrap();

        let mail = get_state(db.pool(), &user.id, "mail").await.unwrap().unwrap();
        let cal = get_state(db.pool(), &user.id, "cal").await.unwrap().unwrap();
        assert_ne!(mail.state_data, cal.state_data);
    }

    #[tokio::test]
    async fn test_clear_state() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        upsert_state(db.pool(), &user.id, "mail", "{}").await.unwrap();
        clear_state(db.pool(), &user.id, "mail").await.unwrap();

        assert!(get_state(db.pool(), &user.id, "mail")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_state_cascades_on_user_delete() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        upsert_state(db.pool(), &user.id, "mail", "{}").await.unwrap();
        crate::user::delete_user(db.pool(), &user.id).await.unwrap();

        assert!(get_state(db.pool(), &user.id, "mail")
            .await
            .unwrap()
            .is_none());
    }
}
