//! Error types for dispatch operations.

use agent_core::AgentError;
use thiserror::Error;

/// Errors that can occur during dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Agent processing failed.
    #[error("agent error: {0}")]
    Agent(#[from] AgentError),
}
