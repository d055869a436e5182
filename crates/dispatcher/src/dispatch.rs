//! Message dispatch to agents.

use agent_core::{InboundMessage, OutboundMessage};
use tracing::{debug, info};

use crate::error::DispatchError;
use crate::registry::AgentRegistry;
use crate::route::parse_mention;

/// Routes inbound messages to agents by mention prefix.
pub struct Dispatcher {
    registry: AgentRegistry,
}

impl Dispatcher {
    /// Create a dispatcher over an agent registry.
    pub fn new(registry: AgentRegistry) -> Self {
        Self { registry }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Canned reply for a mention of an agent that isn't registered.
    ///
    /// Unknown agents are a product gap, not an error: the reply always
    /// contains "coming soon".
    fn coming_soon(message: &InboundMessage, name: &str) -> OutboundMessage {
        OutboundMessage::reply_to(
            message,
            format!("The @{} agent is coming soon! For now, try @mail.", name),
        )
    }

    /// Dispatch a message to the right agent and return its reply.
    ///
    /// The mention prefix (when present and recognized) is stripped before
    /// the agent sees the text.
    pub async fn dispatch(&self, message: InboundMessage) -> Result<OutboundMessage, DispatchError> {
        match parse_mention(&message.text) {
            Some(mention) => match self.registry.get(&mention.name) {
                Some(agent) => {
                    debug!(agent = %mention.name, "Routing mention to agent");
                    let stripped = InboundMessage {
                        text: mention.rest,
                        ..message
                    };
                    Ok(agent.process(stripped).await?)
                }
                None => {
                    info!(agent = %mention.name, "Mention of unknown agent");
                    Ok(Self::coming_soon(&message, &mention.name))
                }
            },
            None => {
                debug!(
                    agent = %self.registry.default_name(),
                    "No mention, routing to default agent"
                );
                Ok(self.registry.default_agent().process(message).await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::{Agent, AgentError};
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Echoes the text it received, tagged with its own name.
    struct EchoStub(&'static str);

    #[async_trait]
    impl Agent for EchoStub {
        async fn process(
            &self,
            message: InboundMessage,
        ) -> Result<OutboundMessage, AgentError> {
            Ok(OutboundMessage::reply_to(&message, format!("{}:{}", self.0, message.text))
                .from_agent(self.0))
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    struct FailingStub;

    #[async_trait]
    impl Agent for FailingStub {
        async fn process(
            &self,
            _message: InboundMessage,
        ) -> Result<OutboundMessage, AgentError> {
            Err(AgentError::Unavailable("down for maintenance".to_string()))
        }

        fn name(&self) -> &str {
            "mail"
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(AgentRegistry::new(Arc::new(EchoStub("mail"))))
    }

    #[tokio::test]
    async fn test_no_mention_goes_to_default() {
        let reply = dispatcher()
            .dispatch(InboundMessage::new("t1", "any new mail?", 0))
            .await
            .unwrap();

        assert_eq!(reply.text, "mail:any new mail?");
        assert_eq!(reply.agent_name.as_deref(), Some("mail"));
    }

    #[tokio::test]
    async fn test_mention_strips_prefix() {
        let reply = dispatcher()
            .dispatch(InboundMessage::new("t1", "@mail show unread", 0))
            .await
            .unwrap();

        assert_eq!(reply.text, "mail:show unread");
    }

    #[tokio::test]
    async fn test_unknown_mention_coming_soon() {
        let reply = dispatcher()
            .dispatch(InboundMessage::new("t1", "@cal what's today?", 0))
            .await
            .unwrap();

        assert!(reply.text.contains("coming soon"));
        assert!(reply.text.contains("@cal"));
        assert!(reply.agent_name.is_none());
    }

    #[tokio::test]
    async fn test_mention_with_empty_remainder_still_routes() {
        let reply = dispatcher()
            .dispatch(InboundMessage::new("t1", "@mail", 0))
            .await
            .unwrap();

        assert_eq!(reply.text, "mail:");
    }

    #[tokio::test]
    async fn test_second_agent_routable() {
        let mut registry = AgentRegistry::new(Arc::new(EchoStub("mail")));
        registry.register(Arc::new(EchoStub("cal")));
        let dispatcher = Dispatcher::new(registry);

        let reply = dispatcher
            .dispatch(InboundMessage::new("t1", "@cal lunch tomorrow", 0))
            .await
            .unwrap();

        assert_eq!(reply.text, "cal:lunch tomorrow");
    }

    #[tokio::test]
    async fn test_agent_error_propagates() {
        let dispatcher = Dispatcher::new(AgentRegistry::new(Arc::new(FailingStub)));

        let result = dispatcher
            .dispatch(InboundMessage::new("t1", "hello", 0))
            .await;

        assert!(matches!(result, Err(DispatchError::Agent(_))));
    }

    #[tokio::test]
    async fn test_thread_id_preserved() {
        let reply = dispatcher()
            .dispatch(InboundMessage::new("thread-42", "@mem remember this", 0))
            .await
            .unwrap();

        assert_eq!(reply.thread_id, "thread-42");
    }
}
