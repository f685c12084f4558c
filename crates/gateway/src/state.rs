use std::sync::Arc;

use fc_domain::config::Config;

use crate::runtime::ConversationOrchestrator;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub orchestrator: Arc<ConversationOrchestrator>,
}
