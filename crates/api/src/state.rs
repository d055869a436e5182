//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use dispatcher::Dispatcher;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Agent dispatcher.
    pub dispatcher: Arc<Dispatcher>,
    /// The user chat turns are attributed to.
    pub user_id: String,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, dispatcher: Dispatcher, user_id: impl Into<String>) -> Self {
        Self {
            db,
            dispatcher: Arc::new(dispatcher),
            user_id: user_id.into(),
        }
    }
}
