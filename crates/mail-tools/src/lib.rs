//! Mail tool registry and providers for the Echo mail assistant.
//!
//! This crate provides the tool layer consumed by the LLM mail agent:
//!
//! - [`Tool`] / [`ToolRegistry`] - named tools dispatched by the agent's
//!   function calls
//! - [`MailProvider`] - the strategy interface over an email backend
//! - [`GmailProvider`] - real Gmail REST API calls
//! - [`MockMailProvider`] - fixed sample data, no network
//! - [`ProviderSelector`] - picks mock vs. real per request
//!
//! The four shipped tools are `list_emails`, `search_emails`, `get_email`
//! and `send_email`; see [`tools`].

mod error;
mod gmail;
mod mock;
mod preview;
mod provider;
mod registry;
mod tool;
pub mod tools;

pub use error::ToolError;
pub use gmail::GmailProvider;
pub use mock::MockMailProvider;
pub use preview::{html_to_text, text_preview};
pub use provider::{
    EmailDetail, EmailSummary, MailMode, MailProvider, OutgoingEmail, ProviderSelector,
};
pub use registry::{FunctionSpec, ToolRegistry};
pub use tool::{Tool, ToolArgs, ToolOutput};
pub use tools::mail_registry;
