//! Tool for fetching a single message with its body.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ToolError;
use crate::provider::ProviderSelector;
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// Fetches one email in full, including a plain-text body preview.
///
/// # Parameters
///
/// - `id` (required): the message id from a previous list/search result.
pub struct GetEmail {
    selector: Arc<ProviderSelector>,
}

impl GetEmail {
    /// Create the tool over a provider selector.
    pub fn new(selector: Arc<ProviderSelector>) -> Self {
        Self { selector }
    }
}

#[async_trait]
impl Tool for GetEmail {
    fn name(&self) -> &str {
        "get_email"
    }

    fn description(&self) -> &str {
        "Fetch a single email by id, including its full plain-text body. Use the id \
         from a previous list_emails or search_emails result."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "The message id to fetch"
                }
            },
            "required": ["id"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let id = args.get_string("id")?;
        let provider = self.selector.select(args.access_token.as_deref());

        debug!(provider = provider.name(), id = %id, "Fetching message");

        let detail = provider
            .get_message(args.access_token.as_deref(), &id)
            .await?;

        Ok(ToolOutput::success(serde_json::to_string(&detail)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_get_email_requires_id() {
        let tool = GetEmail::new(Arc::new(ProviderSelector::mock_only()));
        let result = tool.execute(ToolArgs::new(HashMap::new())).await;
        assert!(matches!(result, Err(ToolError::MissingParameter(_))));
    }

    #[tokio::test]
    async fn test_get_email_mock() {
        let tool = GetEmail::new(Arc::new(ProviderSelector::mock_only()));
        let mut params = HashMap::new();
        params.insert("id".to_string(), json!("mock-1"));

        let result = tool.execute(ToolArgs::new(params)).await.unwrap();
        assert!(result.success);

        let detail: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(detail["id"], "mock-1");
        assert!(detail["body"].as_str().unwrap().contains("Thursday"));
    }

    #[tokio::test]
    async fn test_get_email_unknown_id() {
        let tool = GetEmail::new(Arc::new(ProviderSelector::mock_only()));
        let mut params = HashMap::new();
        params.insert("id".to_string(), json!("missing"));

        let result = tool.execute(ToolArgs::new(params)).await;
        assert!(matches!(result, Err(ToolError::Provider(_))));
    }
}
