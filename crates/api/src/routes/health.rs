//! Health check endpoint.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
}

/// Health check endpoint.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
