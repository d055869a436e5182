//! Login session storage.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Session;

/// Create a session.
pub async fn create_session(pool: &SqlitePool, session: &Session) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO sessions (id, user_id, token, expires_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&session.id)
    .bind(&session.user_id)
    .bind(&session.token)
    .bind(&session.expires_at)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Session",
                    id: session.id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Look up a live session by token. Expired sessions are not returned.
pub async fn get_session_by_token(pool: &SqlitePool, token: &str) -> Result<Option<Session>> {
    let session = sqlx::query_as::<_, Session>(
        r#"
        SELECT id, user_id, token, expires_at, created_at
        FROM sessions
        WHERE token = ? AND expires_at > datetime('now')
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// Delete a session by ID.
pub async fn delete_session(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Session",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Remove all expired sessions, returning how many were deleted.
pub async fn delete_expired(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE expires_at <= datetime('now')
        "#,
    )
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_user, test_db};

    fn session(user_id: &str, id: &str, token: &str, expires_at: &str) -> Session {
        Session {
            id: id.to_string(),
            user_id: user_id.to_string(),
            token: token.to_string(),
            expires_at: expires_at.to_string(),
            created_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        create_session(db.pool(), &session(&user.id, "s1", "tok-1", "2099-01-01 00:00:00"))
            .await
            .unwrap();

        let found = get_session_by_token(db.pool(), "tok-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user_id, user.id);
        assert!(!found.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_expired_session_not_returned() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        create_session(db.pool(), &session(&user.id, "s1", "tok-1", "2000-01-01 00:00:00"))
            .await
            .unwrap();

        assert!(get_session_by_token(db.pool(), "tok-1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_token_rejected() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        create_session(db.pool(), &session(&user.id, "s1", "tok-1", "2099-01-01 00:00:00"))
            .await
            .unwrap();
        let result =
            create_session(db.pool(), &session(&user.id, "s2", "tok-1", "2099-01-01 00:00:00"))
                .await;

        assert!(matches!(
            result,
            Err(DatabaseError::AlreadyExists { entity: "Session", .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_session() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        create_session(db.pool(), &session(&user.id, "s1", "tok-1", "2099-01-01 00:00:00"))
            .await
            .unwrap();

        delete_session(db.pool(), "s1").await.unwrap();
        assert!(get_session_by_token(db.pool(), "tok-1")
            .await
            .unwrap()
            .is_none());

        let result = delete_session(db.pool(), "s1").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_expired() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        create_session(db.pool(), &session(&user.id, "s1", "tok-1", "2000-01-01 00:00:00"))
            .await
            .unwrap();
        create_session(db.pool(), &session(&user.id, "s2", "tok-2", "2099-01-01 00:00:00"))
            .await
            .unwrap();

        let removed = delete_expired(db.pool()).await.unwrap();
        assert_eq!(removed, 1);

        assert!(get_session_by_token(db.pool(), "tok-2")
            .await
            .unwrap()
            .is_some());
    }
}
