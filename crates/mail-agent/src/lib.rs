//! OpenAI-backed mail agent.
//!
//! [`MailAgent`] implements the [`agent_core::Agent`] trait by calling the
//! OpenAI chat completions API with the mail tools advertised for function
//! calling. Tool calls are dispatched through a [`mail_tools::ToolRegistry`],
//! threading the request's Gmail access token to the provider layer.

mod agent;
mod api_types;
mod config;

pub use agent::{MailAgent, DEFAULT_MAIL_SYSTEM_PROMPT};
pub use config::{MailAgentConfig, MailAgentConfigBuilder, DEFAULT_PROMPT_FILE};
