//! The Agent trait definition.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::{InboundMessage, OutboundMessage};

/// A trait for processing inbound chat messages and generating responses.
///
/// Implementations range from canned-reply stubs to full LLM backends.
/// This trait is object-safe and can be used with `Arc<dyn Agent>`.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process an inbound message and generate a response.
    ///
    /// # Arguments
    ///
    /// * `message` - The incoming message to process.
    ///
    /// # Returns
    ///
    /// An `OutboundMessage` containing the response, or an error if
    /// processing failed.
    async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, AgentError>;

    /// Get a human-readable name for this agent implementation.
    ///
    /// This is also the name users address in chat via `@name`.
    fn name(&self) -> &str;

    /// Check if the agent is ready to process messages.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }

    /// Gracefully shut down the agent.
    ///
    /// Default implementation does nothing.
    async fn shutdown(&self) -> Result<(), AgentError> {
        Ok(())
    }
}
