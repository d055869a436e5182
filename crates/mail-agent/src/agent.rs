//! MailAgent implementation using the OpenAI chat completions API.

use std::sync::Arc;

use agent_core::{
    async_trait, Agent, AgentError, ConversationHistory, InboundMessage, OutboundMessage,
};
use mail_tools::ToolRegistry;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseMessage, ToolDef,
};
use crate::config::MailAgentConfig;

/// Default HTTP timeout for API requests (60 seconds).
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Default system prompt (used when no prompt file or env var is configured).
pub const DEFAULT_MAIL_SYSTEM_PROMPT: &str = r#"You are the mail agent of a personal assistant app. You help the user manage their email through chat.

You have tools to list recent emails, search emails with Gmail queries, fetch a single email in full, and send emails.

Guidelines:
- When the user asks about their inbox, unread mail, or a specific message, use the tools rather than guessing.
- Summarize email lists compactly: sender, subject, and whether unread. Don't dump raw JSON at the user.
- Before sending an email, confirm you have an explicit recipient, subject, and body from the user. Never invent recipients.
- If a tool returns no results, say so plainly.
- Keep replies short and conversational; this is a chat app, not a report."#;

/// The mail agent: an LLM-driven handler that answers email questions by
/// calling mail tools.
///
/// Maintains per-thread conversation history and runs a bounded
/// tool-calling loop against the OpenAI API.
pub struct MailAgent {
    client: Client,
    config: MailAgentConfig,
    history: ConversationHistory,
    tools: Arc<ToolRegistry>,
}

impl MailAgent {
    /// Create a new MailAgent with the given configuration and tool registry.
    pub fn new(config: MailAgentConfig, tools: Arc<ToolRegistry>) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                AgentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let history = ConversationHistory::new(config.max_history_turns);

        info!(
            "MailAgent initialized with model: {}, {} tools",
            config.model,
            tools.list_tools().len()
        );

        Ok(Self {
            client,
            config,
            history,
            tools,
        })
    }

    /// Create a MailAgent from environment variables.
    ///
    /// See [`MailAgentConfig::from_env`] for the variables consumed.
    pub fn from_env(tools: Arc<ToolRegistry>) -> Result<Self, AgentError> {
        let config = MailAgentConfig::from_env()?;
        Self::new(config, tools)
    }

    /// Get the configuration.
    pub fn config(&self) -> &MailAgentConfig {
        &self.config
    }

    /// Clear conversation history for a specific thread.
    pub async fn clear_history(&self, thread_id: &str) {
        self.history.clear(thread_id).await;
    }

    /// Build the initial messages array for a chat completion request.
    async fn build_messages(&self, thread_id: &str, user_text: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::new();

        let system_prompt = self
            .config
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_MAIL_SYSTEM_PROMPT);
        messages.push(ChatMessage::system(system_prompt));

        for msg in self.history.get(thread_id).await {
            messages.push(ChatMessage {
                role: msg.role,
                content: Some(msg.content),
                tool_calls: None,
                tool_call_id: None,
            });
        }

        messages.push(ChatMessage::user(user_text));

        messages
    }

    fn tool_defs(&self) -> Option<Vec<ToolDef>> {
        let specs = self.tools.function_specs();
        if specs.is_empty() {
            return None;
        }
        Some(specs.into_iter().map(ToolDef::from_spec).collect())
    }

    /// Make a chat completion request to the OpenAI API.
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatCompletionResponse, AgentError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            tools: self.tool_defs(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending request to OpenAI API: {:?}", request);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(AgentError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(AgentError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AgentError::ProcessingFailed(format!("Failed to parse response: {}", e)))?;

        Ok(completion)
    }

    /// Execute the tool calls from a model turn and append the results.
    async fn run_tool_calls(
        &self,
        assistant: &ResponseMessage,
        messages: &mut Vec<ChatMessage>,
        access_token: Option<&str>,
    ) {
        messages.push(assistant.to_chat_message());

        let calls = assistant.tool_calls.as_deref().unwrap_or_default();
        for call in calls {
            debug!(
                tool = %call.function.name,
                args = %call.function.arguments,
                "Executing tool call"
            );

            let content = match self
                .tools
                .execute_json(&call.function.name, &call.function.arguments, access_token)
                .await
            {
                Ok(output) => output.content,
                Err(e) => {
                    // Tool failures go back to the model as text so it can
                    // apologize or retry differently, not abort the chat.
                    warn!(tool = %call.function.name, error = %e, "Tool call failed");
                    format!("Error: {}", e)
                }
            };

            messages.push(ChatMessage::tool_result(call.id.clone(), content));
        }
    }

    fn first_choice(
        completion: ChatCompletionResponse,
    ) -> Result<ResponseMessage, AgentError> {
        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| AgentError::ProcessingFailed("empty choices in response".to_string()))
    }
}

#[async_trait]
impl Agent for MailAgent {
    async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, AgentError> {
        let thread_id = &message.thread_id;
        let access_token = message.access_token.as_deref();

        debug!("Processing message in thread {}: {}", thread_id, message.text);

        let mut messages = self.build_messages(thread_id, &message.text).await;

        let mut rounds = 0;
        let reply_text = loop {
            let completion = self.chat_completion(messages.clone()).await?;
            let assistant = Self::first_choice(completion)?;

            let has_tool_calls = assistant
                .tool_calls
                .as_ref()
                .is_some_and(|calls| !calls.is_empty());

            if !has_tool_calls {
                break assistant.content.unwrap_or_default();
            }

            rounds += 1;
            if rounds > self.config.max_tool_rounds {
                warn!(
                    thread_id = %thread_id,
                    "Tool round limit reached, asking model to answer without tools"
                );
                break assistant
                    .content
                    .unwrap_or_else(|| "I couldn't finish checking your mail, please try again.".to_string());
            }

            self.run_tool_calls(&assistant, &mut messages, access_token)
                .await;
        };

        self.history
            .add_exchange(thread_id, &message.text, &reply_text)
            .await;

        info!(
            thread_id = %thread_id,
            rounds,
            reply_len = reply_text.len(),
            "Mail agent reply ready"
        );

        Ok(OutboundMessage::reply_to(&message, reply_text).from_agent(self.name()))
    }

    fn name(&self) -> &str {
        "mail"
    }

    async fn is_ready(&self) -> bool {
        !self.config.api_key.is_empty()
    }
}
