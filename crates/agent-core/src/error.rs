//! Error types for agent operations.

use thiserror::Error;

/// Errors that can occur during agent processing.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The agent is misconfigured (missing API key, bad URL, etc.)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A network request to the model provider failed.
    #[error("network error: {0}")]
    Network(String),

    /// The message could not be processed.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The agent is temporarily unavailable.
    #[error("agent unavailable: {0}")]
    Unavailable(String),

    /// A timeout occurred during processing.
    #[error("processing timed out")]
    Timeout,
}
