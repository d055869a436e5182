//! OAuth token storage, one row per (user, provider).

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::OauthToken;

/// Store or refresh a user's token for a provider.
pub async fn upsert_token(pool: &SqlitePool, token: &OauthToken) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO oauth_tokens (user_id, provider, access_token, refresh_token, expires_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(user_id, provider) DO UPDATE SET
            access_token = excluded.access_token,
            refresh_token = excluded.refresh_token,
            expires_at = excluded.expires_at,
            updated_at = datetime('now')
        "#,
    )
    .bind(&token.user_id)
    .bind(&token.provider)
    .bind(&token.access_token)
    .bind(&token.refresh_token)
    .bind(&token.expires_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a user's token for a provider, if stored.
pub async fn get_token(
    pool: &SqlitePool,
    user_id: &str,
    provider: &str,
) -> Result<Option<OauthToken>> {
    let token = sqlx::query_as::<_, OauthToken>(
        r#"
        SELECT user_id, provider, access_token, refresh_token, expires_at, updated_at
        FROM oauth_tokens
        WHERE user_id = ? AND provider = ?
        "#,
    )
    .bind(user_id)
    .bind(provider)
    .fetch_optional(pool)
    .await?;

    Ok(token)
}

/// Delete a user's token for a provider.
pub async fn delete_token(pool: &SqlitePool, user_id: &str, provider: &str) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM oauth_tokens
        WHERE user_id = ? AND provider = ?
        "#,
    )
    .bind(user_id)
    .bind(provider)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_user, test_db};

    fn google_token(user_id: &str, access: &str) -> OauthToken {
        OauthToken {
            user_id: user_id.to_string(),
            provider: "google".to_string(),
            access_token: access.to_string(),
            refresh_token: Some("refresh-1".to_string()),
            expires_at: Some("2099-01-01 00:00:00".to_string()),
            updated_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_get_token() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        upsert_token(db.pool(), &google_token(&user.id, "acc-1"))
            .await
            .unwrap();

        let token = get_token(db.pool(), &user.id, "google")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(token.access_token, "acc-1");
        assert_eq!(token.refresh_token.as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_upsert_refreshes_token() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        upsert_token(db.pool(), &google_token(&user.id, "acc-1"))
            .await
            .unwrap();
        upsert_token(db.pool(), &google_token(&user.id, "acc-2"))
            .await
            .unwrap();

        let token = get_token(db.pool(), &user.id, "google")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(token.access_token, "acc-2");
    }

    #[tokio::test]
    async fn test_missing_token() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        assert!(get_token(db.pool(), &user.id, "google")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_token() {
        let db = test_db().await;
        let user = seed_user(&db, "u1").await;

        upsert_token(db.pool(), &google_token(&user.id, "acc-1"))
            .await
            .unwrap();
        delete_token(db.pool(), &user.id, "google").await.unwrap();

        assert!(get_token(db.pool(), &user.id, "google")
            .await
            .unwrap()
            .is_none());
    }
}
