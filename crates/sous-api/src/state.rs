use std::sync::Arc;

use sous_agent::ConversationService;
use sous_persist::ConversationStore;

use crate::config::Config;

/// Shared application state passed to all handlers.
///
/// All resources are Arc-wrapped for sharing across async tasks; the
/// service is stateless per request, so one instance serves everything.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub service: Arc<ConversationService>,
    pub store: Arc<dyn ConversationStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        service: ConversationService,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
            store,
        }
    }
}
