//! Configuration for MailAgent.

use agent_core::AgentError;
use std::env;
use std::path::Path;

/// Default system prompt file name.
pub const DEFAULT_PROMPT_FILE: &str = "MAIL_PROMPT.md";

/// Configuration for MailAgent.
#[derive(Debug, Clone)]
pub struct MailAgentConfig {
    /// OpenAI-compatible API URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Optional system prompt (falls back to the embedded default).
    pub system_prompt: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Maximum number of conversation turns to keep per thread.
    pub max_history_turns: usize,

    /// Maximum tool-call rounds per message before giving up.
    pub max_tool_rounds: usize,
}

impl Default for MailAgentConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            system_prompt: None,
            max_tokens: Some(1024),
            temperature: Some(0.7),
            max_history_turns: 10,
            max_tool_rounds: 4,
        }
    }
}

impl MailAgentConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENAI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `OPENAI_API_URL` - API URL (default: https://api.openai.com)
    /// - `OPENAI_MODEL` - Model name (default: gpt-4o-mini)
    /// - `MAIL_SYSTEM_PROMPT` - System prompt (overrides prompt file)
    /// - `MAIL_PROMPT_FILE` - Path to system prompt file (default: MAIL_PROMPT.md)
    /// - `OPENAI_MAX_TOKENS` - Max tokens (default: 1024)
    /// - `OPENAI_TEMPERATURE` - Temperature (default: 0.7)
    /// - `MAIL_MAX_HISTORY_TURNS` - Max history turns (default: 10)
    /// - `MAIL_MAX_TOOL_ROUNDS` - Max tool-call rounds (default: 4)
    ///
    /// System prompt priority:
    /// 1. `MAIL_SYSTEM_PROMPT` env var (if set)
    /// 2. Contents of prompt file (if exists)
    /// 3. None (agent uses its embedded default)
    pub fn from_env() -> Result<Self, AgentError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| AgentError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let api_url =
            env::var("OPENAI_API_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        // System prompt: env var takes precedence, then try loading from file
        let system_prompt = if let Ok(prompt) = env::var("MAIL_SYSTEM_PROMPT") {
            Some(prompt)
        } else {
            let prompt_file =
                env::var("MAIL_PROMPT_FILE").unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());
            load_prompt_file(&prompt_file)
        };

        let max_tokens = env::var("OPENAI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(1024));

        let temperature = env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        let max_history_turns = env::var("MAIL_MAX_HISTORY_TURNS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let max_tool_rounds = env::var("MAIL_MAX_TOOL_ROUNDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        Ok(Self {
            api_url,
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
            max_history_turns,
            max_tool_rounds,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> MailAgentConfigBuilder {
        MailAgentConfigBuilder::default()
    }
}

/// Builder for MailAgentConfig.
#[derive(Debug, Default)]
pub struct MailAgentConfigBuilder {
    config: MailAgentConfig,
}

impl MailAgentConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the max history turns.
    pub fn max_history_turns(mut self, turns: usize) -> Self {
        self.config.max_history_turns = turns;
        self
    }

    /// Set the max tool-call rounds.
    pub fn max_tool_rounds(mut self, rounds: usize) -> Self {
        self.config.max_tool_rounds = rounds;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> MailAgentConfig {
        self.config
    }
}

/// Load a prompt file, returning None if not found or empty.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();

    match std::fs::read_to_string(path) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MailAgentConfig::default();

        assert_eq!(config.api_url, "https://api.openai.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.system_prompt.is_none());
        assert_eq!(config.max_tokens, Some(1024));
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.max_history_turns, 10);
        assert_eq!(config.max_tool_rounds, 4);
    }

    #[test]
    fn test_builder_all_options() {
        let config = MailAgentConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.com")
            .model("gpt-4o")
            .system_prompt("You are a mail assistant")
            .max_tokens(512)
            .temperature(0.5)
            .max_history_turns(5)
            .max_tool_rounds(2)
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "https://custom.api.com");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(
            config.system_prompt,
            Some("You are a mail assistant".to_string())
        );
        assert_eq!(config.max_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.5));
        assert_eq!(config.max_history_turns, 5);
        assert_eq!(config.max_tool_rounds, 2);
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_vars() {
            std::env::remove_var("OPENAI_API_KEY");
            std::env::remove_var("OPENAI_API_URL");
            std::env::remove_var("OPENAI_MODEL");
            std::env::remove_var("MAIL_SYSTEM_PROMPT");
            std::env::remove_var("MAIL_PROMPT_FILE");
            std::env::remove_var("OPENAI_MAX_TOKENS");
            std::env::remove_var("OPENAI_TEMPERATURE");
            std::env::remove_var("MAIL_MAX_HISTORY_TURNS");
            std::env::remove_var("MAIL_MAX_TOOL_ROUNDS");
        }

        // Missing API key should error
        clear_vars();
        let result = MailAgentConfig::from_env();
        match result {
            Err(AgentError::Configuration(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other.map(|_| ())),
        }

        // Only API key set, defaults used
        clear_vars();
        std::env::set_var("OPENAI_API_KEY", "test-env-key");

        let config = MailAgentConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.api_url, "https://api.openai.com");
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.system_prompt.is_none());

        // All vars set
        clear_vars();
        std::env::set_var("OPENAI_API_KEY", "full-test-key");
        std::env::set_var("OPENAI_API_URL", "https://test.api.com");
        std::env::set_var("OPENAI_MODEL", "gpt-4o");
        std::env::set_var("MAIL_SYSTEM_PROMPT", "Test prompt");
        std::env::set_var("OPENAI_MAX_TOKENS", "2048");
        std::env::set_var("OPENAI_TEMPERATURE", "0.9");
        std::env::set_var("MAIL_MAX_HISTORY_TURNS", "20");
        std::env::set_var("MAIL_MAX_TOOL_ROUNDS", "6");

        let config = MailAgentConfig::from_env().unwrap();
        assert_eq!(config.api_key, "full-test-key");
        assert_eq!(config.api_url, "https://test.api.com");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.system_prompt, Some("Test prompt".to_string()));
        assert_eq!(config.max_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.9));
        assert_eq!(config.max_history_turns, 20);
        assert_eq!(config.max_tool_rounds, 6);

        clear_vars();
    }
}
