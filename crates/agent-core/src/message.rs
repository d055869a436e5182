//! Message types for agent input and output.

use serde::{Deserialize, Serialize};

/// An inbound chat message to be processed by an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Conversation thread this message belongs to.
    pub thread_id: String,
    /// The message text (mention prefix already stripped by the dispatcher).
    pub text: String,
    /// Optional OAuth access token supplied with the request, threaded
    /// through to tools that call external APIs on the user's behalf.
    pub access_token: Option<String>,
    /// Unix timestamp (seconds) when the message was received.
    pub timestamp: u64,
}

impl InboundMessage {
    /// Create a new inbound message.
    pub fn new(thread_id: impl Into<String>, text: impl Into<String>, timestamp: u64) -> Self {
        Self {
            thread_id: thread_id.into(),
            text: text.into(),
            access_token: None,
            timestamp,
        }
    }

    /// Attach an access token for external API tools.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// An outbound response produced by an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Thread the response belongs to (echoed from the inbound message).
    pub thread_id: String,
    /// Response text.
    pub text: String,
    /// Name of the agent that produced the response, if any.
    pub agent_name: Option<String>,
}

impl OutboundMessage {
    /// Create a response addressed to the same thread as an inbound message.
    pub fn reply_to(message: &InboundMessage, text: impl Into<String>) -> Self {
        Self {
            thread_id: message.thread_id.clone(),
            text: text.into(),
            agent_name: None,
        }
    }

    /// Tag the response with the producing agent's name.
    pub fn from_agent(mut self, name: impl Into<String>) -> Self {
        self.agent_name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_to_echoes_thread() {
        let inbound = InboundMessage::new("thread-1", "hello", 1234567890);
        let reply = OutboundMessage::reply_to(&inbound, "hi there");

        assert_eq!(reply.thread_id, "thread-1");
        assert_eq!(reply.text, "hi there");
        assert!(reply.agent_name.is_none());
    }

    #[test]
    fn test_from_agent_tags_name() {
        let inbound = InboundMessage::new("t", "hello", 0);
        let reply = OutboundMessage::reply_to(&inbound, "ok").from_agent("mail");

        assert_eq!(reply.agent_name.as_deref(), Some("mail"));
    }

    #[test]
    fn test_with_access_token() {
        let inbound = InboundMessage::new("t", "hello", 0).with_access_token("ya29.token");
        assert_eq!(inbound.access_token.as_deref(), Some("ya29.token"));
    }
}
