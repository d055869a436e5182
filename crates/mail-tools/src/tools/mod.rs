//! The mail tools exposed to the agent.
//!
//! Each tool wraps one provider operation. The set matches what the chat
//! assistant needs to answer inbox questions: list, search, fetch, send.

mod get_email;
mod list_emails;
mod search_emails;
mod send_email;

pub use get_email::GetEmail;
pub use list_emails::ListEmails;
pub use search_emails::SearchEmails;
pub use send_email::SendEmail;

use std::sync::Arc;

use crate::provider::ProviderSelector;
use crate::registry::ToolRegistry;

/// Default number of messages returned by list/search when the model does
/// not ask for a specific count.
pub(crate) const DEFAULT_MAX_RESULTS: u32 = 10;

/// Upper bound on list/search result counts.
pub(crate) const MAX_RESULTS_CAP: u32 = 50;

pub(crate) fn clamp_max_results(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_MAX_RESULTS)
        .clamp(1, MAX_RESULTS_CAP)
}

/// Build a registry with all four mail tools over the given selector.
pub fn mail_registry(selector: Arc<ProviderSelector>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(ListEmails::new(selector.clone()));
    registry.register(SearchEmails::new(selector.clone()));
    registry.register(GetEmail::new(selector.clone()));
    registry.register(SendEmail::new(selector));
    registry
}
