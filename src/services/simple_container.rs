use std::sync::Arc;
use tracing::info;

use super::ServiceFactory;
use crate::config::Config;
use crate::core::infrastructure::CacheStore;
use crate::core::LyricsOrchestrator;
use crate::error::Result;

pub struct SimpleServices {
    config: Arc<Config>,
    orchestrator: Arc<LyricsOrchestrator>,
}

impl SimpleServices {
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);
        let factory = ServiceFactory::new(config.clone());

        let store = factory.create_cache_store()?;
        let orchestrator = LyricsOrchestrator::new(
            store,
            factory.create_lyrics_provider(),
            factory.create_translation_provider(),
            factory.orchestrator_settings(),
        );

        let availability = orchestrator.availability();
        info!(
            "Providers: lyrics={}, translation={}",
            availability.lyrics_provider, availability.translation_provider
        );

        Ok(Self {
            config,
            orchestrator: Arc::new(orchestrator),
        })
    }

    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn orchestrator(&self) -> Arc<LyricsOrchestrator> {
        self.orchestrator.clone()
    }

    pub fn cache_store(&self) -> Arc<dyn CacheStore> {
        self.orchestrator.store().clone()
    }
}
