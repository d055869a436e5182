//! The static agent name lookup table.

use std::collections::HashMap;
use std::sync::Arc;

use agent_core::Agent;
use tracing::info;

/// A static name-to-agent table with a designated default.
///
/// Names are matched lowercased, exactly as parsed from the mention.
pub struct AgentRegistry {
    agents: HashMap<String, Arc<dyn Agent>>,
    default_name: String,
}

impl AgentRegistry {
    /// Create a registry whose default agent handles un-mentioned messages.
    pub fn new(default_agent: Arc<dyn Agent>) -> Self {
        let default_name = default_agent.name().to_lowercase();
        let mut agents = HashMap::new();
        info!("Registering default agent: {}", default_name);
        agents.insert(default_name.clone(), default_agent);

        Self {
            agents,
            default_name,
        }
    }

    /// Register an additional agent under its own name.
    pub fn register(&mut self, agent: Arc<dyn Agent>) {
        let name = agent.name().to_lowercase();
        info!("Registering agent: {}", name);
        self.agents.insert(name, agent);
    }

    /// Look up an agent by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Agent>> {
        self.agents.get(name)
    }

    /// The default agent.
    pub fn default_agent(&self) -> &Arc<dyn Agent> {
        // The constructor guarantees the default name is present.
        &self.agents[&self.default_name]
    }

    /// The default agent's name.
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Registered agent names.
    pub fn names(&self) -> Vec<&str> {
        self.agents.keys().map(|s| s.as_str()).collect()
    }
}
