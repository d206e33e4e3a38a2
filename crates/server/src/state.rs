use std::sync::Arc;

use nearby_core::{Config, PlacesProvider, Recommender, SanitizedConfig, SearchOrchestrator};

/// Shared application state
pub struct AppState {
    config: Config,
    provider: Arc<dyn PlacesProvider>,
    orchestrator: Arc<SearchOrchestrator>,
    recommender: Recommender,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn PlacesProvider>) -> Self {
        let orchestrator = Arc::new(SearchOrchestrator::from_config(
            Arc::clone(&provider),
            &config.search,
        ));
        let recommender = Recommender::new(Arc::clone(&orchestrator), config.search.keyword_strategy);

        Self {
            config,
            provider,
            orchestrator,
            recommender,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn provider(&self) -> &dyn PlacesProvider {
        self.provider.as_ref()
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator {
        &self.orchestrator
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }
}
