//! The chat endpoint.

use std::time::{SystemTime, UNIX_EPOCH};

use agent_core::InboundMessage;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use database::{agent_state, message, NewMessage};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Chat request payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's message text.
    pub message: Option<String>,
    /// OAuth access token for tools that act on the user's behalf.
    pub access_token: Option<String>,
    /// Conversation thread to continue; a new one is minted when absent.
    pub thread_id: Option<String>,
}

/// Chat response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    /// The agent's reply text.
    pub text: String,
    /// Thread the exchange belongs to (echoed, or freshly minted).
    pub thread_id: String,
}

/// Handle a chat turn: persist it, dispatch to an agent, persist the reply.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let text = match req.message.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => return Err(ApiError::Validation("Message is required".to_string())),
    };

    let thread_id = req
        .thread_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    info!(thread = %thread_id, "Handling chat message");

    let pool = state.db.pool();
    message::insert_message(
        pool,
        &NewMessage::user(Some(state.user_id.clone()), &thread_id, &text),
    )
    .await?;

    let mut inbound = InboundMessage::new(&thread_id, &text, unix_now());
    if let Some(token) = req.access_token {
        inbound = inbound.with_access_token(token);
    }

    let reply = state.dispatcher.dispatch(inbound).await?;

    message::insert_message(
        pool,
        &NewMessage::assistant(
            Some(state.user_id.clone()),
            &thread_id,
            &reply.text,
            reply.agent_name.clone(),
        ),
    )
    .await?;

    if let Some(agent_name) = &reply.agent_name {
        let state_data = serde_json::json!({
            "last_thread_id": thread_id,
            "last_active": Utc::now().to_rfc3339(),
        });
        agent_state::upsert_state(pool, &state.user_id, agent_name, &state_data.to_string())
            .await?;
    }

    Ok(Json(ChatResponse {
        success: true,
        text: reply.text,
        thread_id,
    }))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
