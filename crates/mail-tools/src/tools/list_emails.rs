//! Tool for listing recent inbox messages.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ToolError;
use crate::provider::ProviderSelector;
use crate::tool::{Tool, ToolArgs, ToolOutput};
use crate::tools::clamp_max_results;

/// Lists the most recent messages in the user's inbox.
///
/// # Parameters
///
/// - `max_results` (optional): number of messages to return (1-50, default 10).
pub struct ListEmails {
    selector: Arc<ProviderSelector>,
}

impl ListEmails {
    /// Create the tool over a provider selector.
    pub fn new(selector: Arc<ProviderSelector>) -> Self {
        Self { selector }
    }
}

#[async_trait]
impl Tool for ListEmails {
    fn name(&self) -> &str {
        "list_emails"
    }

    fn description(&self) -> &str {
        "List the most recent emails in the user's inbox, with sender, subject, date, \
         snippet, and unread status."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "max_results": {
                    "type": "integer",
                    "description": "How many emails to return (1-50, default 10)"
                }
            }
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let max_results = clamp_max_results(args.get_u32_opt("max_results")?);
        let provider = self.selector.select(args.access_token.as_deref());

        debug!(
            provider = provider.name(),
            max_results, "Listing inbox messages"
        );

        let messages = provider
            .list_messages(args.access_token.as_deref(), max_results)
            .await?;

        Ok(ToolOutput::success(serde_json::to_string(&messages)?))
    }
}
