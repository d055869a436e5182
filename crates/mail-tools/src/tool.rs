//! Tool trait definition and types.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;

/// Arguments passed to a tool for execution.
#[derive(Debug, Clone)]
pub struct ToolArgs {
    /// Parameters as key-value pairs.
    pub params: HashMap<String, Value>,
    /// Optional OAuth access token for providers that call external APIs.
    pub access_token: Option<String>,
}

impl ToolArgs {
    /// Create new tool arguments with the given parameters.
    pub fn new(params: HashMap<String, Value>) -> Self {
        Self {
            params,
            access_token: None,
        }
    }

    /// Create tool arguments carrying an access token.
    pub fn with_access_token(params: HashMap<String, Value>, token: impl Into<String>) -> Self {
        Self {
            params,
            access_token: Some(token.into()),
        }
    }

    /// Get a string parameter, returning an error if missing or not a string.
    pub fn get_string(&self, key: &str) -> Result<String, ToolError> {
        self.params
            .get(key)
            .ok_or_else(|| ToolError::MissingParameter(key.to_string()))?
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ToolError::InvalidParameter {
                name: key.to_string(),
                reason: "expected string".to_string(),
            })
    }

    /// Get an optional string parameter.
    pub fn get_string_opt(&self, key: &str) -> Option<String> {
        self.params.get(key)?.as_str().map(|s| s.to_string())
    }

    /// Get an optional unsigned integer parameter.
    ///
    /// Accepts any JSON number with an integral value.
    pub fn get_u32_opt(&self, key: &str) -> Result<Option<u32>, ToolError> {
        match self.params.get(key) {
            Some(v) => {
                let num = v.as_u64().ok_or_else(|| ToolError::InvalidParameter {
                    name: key.to_string(),
                    reason: "expected non-negative integer".to_string(),
                })?;
                u32::try_from(num)
                    .map(Some)
                    .map_err(|_| ToolError::InvalidParameter {
                        name: key.to_string(),
                        reason: "value out of range".to_string(),
                    })
            }
            None => Ok(None),
        }
    }
}

/// Output from a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The result content (text or JSON).
    pub content: String,
    /// Whether the execution was successful.
    pub success: bool,
}

impl ToolOutput {
    /// Create a successful output.
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: true,
        }
    }

    /// Create a failed output.
    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: false,
        }
    }
}

/// Trait for tools callable by the mail agent.
///
/// Tools wrap provider operations (list, search, fetch, send) behind a name,
/// a description, and a JSON-schema parameter spec that is advertised to the
/// model for function calling.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (used for dispatch and function calling).
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// JSON schema describing the tool's parameters.
    fn parameters(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError>;
}
