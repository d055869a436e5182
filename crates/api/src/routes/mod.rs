//! Route handlers for the HTTP API.

pub mod chat;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat::chat))
        .route("/health", get(health::health))
}
