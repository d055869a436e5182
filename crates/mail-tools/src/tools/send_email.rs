//! Tool for sending an email.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use crate::error::ToolError;
use crate::provider::{OutgoingEmail, ProviderSelector};
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// Sends an email on the user's behalf.
///
/// # Parameters
///
/// - `to` (required): recipient address.
/// - `subject` (required): subject line.
/// - `body` (required): plain-text body.
pub struct SendEmail {
    selector: Arc<ProviderSelector>,
}

impl SendEmail {
    /// Create the tool over a provider selector.
    pub fn new(selector: Arc<ProviderSelector>) -> Self {
        Self { selector }
    }
}

#[async_trait]
impl Tool for SendEmail {
    fn name(&self) -> &str {
        "send_email"
    }

    fn description(&self) -> &str {
        "Send an email from the user's account. Only call this after the user has \
         confirmed the recipient, subject, and body."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "to": {
                    "type": "string",
                    "description": "Recipient email address"
                },
                "subject": {
                    "type": "string",
                    "description": "Subject line"
                },
                "body": {
                    "type": "string",
                    "description": "Plain-text body"
                }
            },
            "required": ["to", "subject", "body"]
        })
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let email = OutgoingEmail::new(
            args.get_string("to")?,
            args.get_string("subject")?,
            args.get_string("body")?,
        );
        let provider = self.selector.select(args.access_token.as_deref());

        info!(provider = provider.name(), to = %email.to, "Sending email");

        let id = provider
            .send_message(args.access_token.as_deref(), &email)
            .await?;

        Ok(ToolOutput::success(json!({ "id": id, "sent": true }).to_string()))
    }
}
