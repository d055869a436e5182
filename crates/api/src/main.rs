//! HTTP API server for the Echo mail assistant.
//!
//! Wires the database, mail tools, mail agent, and dispatcher together and
//! serves the chat endpoint.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use database::{user, Database, DatabaseError, User};
use dispatcher::{AgentRegistry, Dispatcher};
use mail_agent::MailAgent;
use mail_tools::{mail_registry, GmailProvider, MailMode, ProviderSelector};
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::state::AppState;

/// Email the single development user is registered under.
const DEV_USER_EMAIL: &str = "dev@localhost";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, mode = ?config.mail_mode, "Starting API server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Chat turns are attributed to a single local user until auth lands.
    let dev_user = ensure_dev_user(&db).await?;
    info!(user = %dev_user.id, "Using development user");

    // Build the mail provider set and tools
    let selector = match config.mail_mode {
        MailMode::Mock => ProviderSelector::mock_only(),
        MailMode::Gmail => {
            let gmail = match &config.gmail_api_url {
                Some(url) => GmailProvider::with_api_url(url)?,
                None => GmailProvider::new()?,
            };
            ProviderSelector::new(MailMode::Gmail, gmail)
        }
    };
    let tools = Arc::new(mail_registry(Arc::new(selector)));

    // Construct agents and the dispatcher
    let mail_agent = MailAgent::from_env(tools)?;
    let registry = AgentRegistry::new(Arc::new(mail_agent));
    let dispatcher = Dispatcher::new(registry);

    // Build application state and router
    let state = AppState::new(db, dispatcher, dev_user.id);
    let app = routes::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Get or create the single development user.
async fn ensure_dev_user(db: &Database) -> Result<User, DatabaseError> {
    match user::get_user_by_email(db.pool(), DEV_USER_EMAIL).await {
        Ok(existing) => Ok(existing),
        Err(DatabaseError::NotFound { .. }) => {
            let dev = User::new(Uuid::new_v4().to_string(), DEV_USER_EMAIL, "dev", "unused");
            user::create_user(db.pool(), &dev).await?;
            Ok(dev)
        }
        Err(err) => Err(err),
    }
}
