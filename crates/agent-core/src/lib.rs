//! Core trait and types for agent implementations.
//!
//! This crate provides the shared interface for all agents in the Echo
//! mail assistant backend. It defines:
//!
//! - [`Agent`] - The trait that all agent implementations must implement
//! - [`InboundMessage`] / [`OutboundMessage`] - Message types for input/output
//! - [`AgentError`] - Error types for agent operations
//! - [`ConversationHistory`] - Per-thread history with bounded memory
//!
//! # Example
//!
//! ```rust
//! use agent_core::{Agent, AgentError, InboundMessage, OutboundMessage};
//! use async_trait::async_trait;
//!
//! struct MyAgent;
//!
//! #[async_trait]
//! impl Agent for MyAgent {
//!     async fn process(&self, message: InboundMessage) -> Result<OutboundMessage, AgentError> {
//!         Ok(OutboundMessage::reply_to(&message, "Hello!"))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MyAgent"
//!     }
//! }
//! ```

mod error;
mod history;
mod message;
mod trait_def;

pub use error::AgentError;
pub use history::{ConversationHistory, HistoryMessage};
pub use message::{InboundMessage, OutboundMessage};
pub use trait_def::Agent;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
