//! Tool registry for managing and executing tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ToolError;
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// A tool's function-calling spec, in the shape the OpenAI API expects
/// inside a `tools` array entry.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    /// Function name.
    pub name: String,
    /// What the function does.
    pub description: String,
    /// JSON schema for the parameters.
    pub parameters: Value,
}

/// Registry for managing tools.
///
/// The registry holds a collection of tools and dispatches execution
/// requests to the appropriate tool by name, injecting the per-request
/// access token into the tool arguments.
pub struct ToolRegistry {
    /// Registered tools by name.
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool.
    ///
    /// If a tool with the same name already exists, it will be replaced.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        info!("Registering tool: {}", name);
        self.tools.insert(name, Arc::new(tool));
    }

    /// Register a boxed tool.
    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        info!("Registering tool: {}", name);
        self.tools.insert(name, tool);
    }

    /// Get a list of registered tool names.
    pub fn list_tools(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get function-calling specs for every registered tool.
    pub fn function_specs(&self) -> Vec<FunctionSpec> {
        self.tools
            .values()
            .map(|t| FunctionSpec {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters(),
            })
            .collect()
    }

    /// Execute a tool by name with the given parameters.
    ///
    /// The access token, when present, is made available to the tool so
    /// real providers can authenticate the underlying API call.
    pub async fn execute(
        &self,
        name: &str,
        params: HashMap<String, Value>,
        access_token: Option<&str>,
    ) -> Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        debug!("Executing tool '{}' with {} params", name, params.len());

        let args = match access_token {
            Some(token) => ToolArgs::with_access_token(params, token),
            None => ToolArgs::new(params),
        };

        let result = tool.execute(args).await?;

        debug!(
            "Tool '{}' completed: success={}, content_len={}",
            name,
            result.success,
            result.content.len()
        );

        Ok(result)
    }

    /// Execute a tool with a JSON arguments string.
    ///
    /// Convenience for dispatching model tool calls, whose arguments arrive
    /// as a JSON-encoded string.
    pub async fn execute_json(
        &self,
        name: &str,
        args_json: &str,
        access_token: Option<&str>,
    ) -> Result<ToolOutput, ToolError> {
        let params: HashMap<String, Value> = serde_json::from_str(args_json)?;
        self.execute(name, params, access_token).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
