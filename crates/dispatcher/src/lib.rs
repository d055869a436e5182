//! Mention parsing and agent routing.
//!
//! The dispatcher decides which agent handles an inbound chat message:
//!
//! - a leading `@name` of a registered agent routes the remainder to it
//! - a leading `@name` nobody registered gets a canned "coming soon" reply
//! - anything else goes to the default (mail) agent unchanged
//!
//! Routing is a static string-prefix match against the registry — there is
//! no model call and no scoring involved.

mod dispatch;
mod error;
mod registry;
mod route;

pub use dispatch::Dispatcher;
pub use error::DispatchError;
pub use registry::AgentRegistry;
pub use route::{parse_mention, Mention};
