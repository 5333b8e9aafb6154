use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::infrastructure::{CacheStore, SqliteCacheStore};
use crate::core::services::{LibreTranslateClient, LyricsProvider, MusixmatchClient, TranslationProvider};
use crate::core::OrchestratorSettings;
use crate::error::Result;

/// Centralized factory for creating all core services
pub struct ServiceFactory {
    config: Arc<Config>,
}

impl ServiceFactory {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Open the SQLite cache, creating and migrating it when needed.
    pub fn create_cache_store(&self) -> Result<Arc<dyn CacheStore>> {
        let store = SqliteCacheStore::open(&self.config.database_path)?;
        Ok(Arc::new(store))
    }

    /// `None` when no API key is configured or the client cannot be built.
    pub fn create_lyrics_provider(&self) -> Option<Arc<dyn LyricsProvider>> {
        let api_key = match self.config.musixmatch_api_key.as_deref() {
            Some(key) if self.config.musixmatch_configured() => key,
            _ => {
                info!("No Musixmatch API key configured; lyrics provider disabled");
                return None;
            }
        };

        match MusixmatchClient::new(&self.config.musixmatch_base_url, api_key, self.timeout()) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!("Failed to initialize Musixmatch client: {}", e);
                None
            }
        }
    }

    pub fn create_translation_provider(&self) -> Option<Arc<dyn TranslationProvider>> {
        if !self.config.translation_enabled {
            info!("Machine translation disabled by configuration");
            return None;
        }

        match LibreTranslateClient::new(
            &self.config.libretranslate_url,
            self.config.libretranslate_api_key.as_deref(),
            self.timeout(),
        ) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                warn!("Failed to initialize LibreTranslate client: {}", e);
                None
            }
        }
    }

    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            default_lang: self.config.default_lang.clone(),
            cache_expiry: chrono::Duration::days(self.config.cache_expiry_days as i64),
            enforce_cache_expiry: self.config.enforce_cache_expiry,
            search_result_limit: self.config.search_result_limit,
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.request_timeout_secs)
    }
}
