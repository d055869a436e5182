//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// UUID primary key.
    pub id: String,
    /// Email address (unique).
    pub email: String,
    /// Display/login name (unique).
    pub username: String,
    /// Password hash. Never the plaintext password.
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: String,
}

impl User {
    /// Build a user for insertion; `created_at` is filled by the database.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: String::new(),
        }
    }
}

/// One chat turn, user or assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Owning user, if attributed.
    pub user_id: Option<String>,
    /// Conversation thread the turn belongs to.
    pub thread_id: String,
    /// Role: "user" or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
    /// Agent that produced an assistant turn, if any.
    pub agent_name: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// A chat turn to insert (id and timestamp assigned by the database).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    /// Owning user, if attributed.
    pub user_id: Option<String>,
    /// Conversation thread.
    pub thread_id: String,
    /// Role: "user" or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
    /// Agent that produced an assistant turn, if any.
    pub agent_name: Option<String>,
}

impl NewMessage {
    /// A user turn.
    pub fn user(
        user_id: Option<String>,
        thread_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            thread_id: thread_id.into(),
            role: "user".to_string(),
            content: content.into(),
            agent_name: None,
        }
    }

    /// An assistant turn attributed to an agent.
    pub fn assistant(
        user_id: Option<String>,
        thread_id: impl Into<String>,
        content: impl Into<String>,
        agent_name: Option<String>,
    ) -> Self {
        Self {
            user_id,
            thread_id: thread_id.into(),
            role: "assistant".to_string(),
            content: content.into(),
            agent_name,
        }
    }
}

/// Per-(user, agent) state blob, upserted on activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AgentState {
    /// Owning user.
    pub user_id: String,
    /// Agent the state belongs to.
    pub agent_name: String,
    /// JSON-encoded state.
    pub state_data: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// A login session token with expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// UUID primary key.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Opaque session token (unique).
    pub token: String,
    /// Expiry timestamp (RFC 3339 / SQLite datetime text).
    pub expires_at: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// Per-(user, provider) OAuth token storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OauthToken {
    /// Owning user.
    pub user_id: String,
    /// Provider name, e.g. "google".
    pub provider: String,
    /// Current access token.
    pub access_token: String,
    /// Refresh token, when the provider issues one.
    pub refresh_token: Option<String>,
    /// Access token expiry, when known.
    pub expires_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: String,
}
