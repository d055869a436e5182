//! Tool for searching messages with a Gmail query string.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ToolError;
use crate::provider::ProviderSelector;
use crate::tool::{Tool, ToolArgs, ToolOutput};
use crate::tools::clamp_max_results;

/// Searches the user's mailbox with a Gmail query (e.g. `is:unread`,
/// `from:alice@example.com`).
///
/// # Parameters
///
/// - `query` (required): Gmail search query string.
/// - `max_results` (optional): number of messages to return (1-50, default 10).
pub struct SearchEmails {
    selector: Arc<ProviderSelector>,
}

impl SearchEmails {
    /// Create the tool over a provider selector.
    pub fn new(selector: Arc<ProviderSelector>) -> Self {
        Self { selector }
    }
}

#[async_trait]
impl Tool for SearchEmails {
    fn name(&self) -> &str {
        "search_emails"
    }

    fn description(&self) -> &str {
        "Search the user's emails with a Gmail query string. Use 'is:unread' to find \
         unread messages, 'from:<address>' to filter by sender."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Gmail search query, e.g. 'is:unread' or 'from:alice@example.com'"
                },
                "max_results": {
                    "type": "integer",
                    "description": "How many emails to return (1-50, default 10)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let query = args.get_string("query")?;
        let max_results = clamp_max_results(args.get_u32_opt("max_results")?);
        let provider = self.selector.select(args.access_token.as_deref());

        debug!(provider = provider.name(), query = %query, "Searching messages");

        let messages = provider
            .search_messages(args.access_token.as_deref(), &query, max_results)
            .await?;

        Ok(ToolOutput::success(serde_json::to_string(&messages)?))
    }
}
