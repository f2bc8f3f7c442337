use crate::{agents::AgentCore, services::chatbot_store::ChatbotStore};
use std::sync::Arc;

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Data access for chatbot lifecycle fields
    pub chatbots: Arc<dyn ChatbotStore>,
    /// Retry engine shared by agent invocations
    pub agent_core: Arc<AgentCore>,
}

impl AppState {
    /// Create a new AppState instance
    ///
    /// # Arguments
    /// * `chatbots` - Store backing the chatbot lifecycle
    /// * `agent_core` - Retry engine built from the `agent` config section
    pub fn new(chatbots: Arc<dyn ChatbotStore>, agent_core: AgentCore) -> Self {
        Self {
            chatbots,
            agent_core: Arc::new(agent_core),
        }
    }
}
