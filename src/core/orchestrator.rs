//! Request orchestration over the cache and the two providers
//!
//! Flow A (`fetch_song`) resolves lyrics and a translation for a song, flow B
//! (`translate_text`) translates a standalone piece of text. Both consult the
//! cache first, isolate every provider call so one failure never aborts the
//! request, and write whatever they obtained back to the cache.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::core::infrastructure::CacheStore;
use crate::core::services::{LyricsProvider, ProviderOutcome, TrackCandidate, TranslationProvider};
use crate::error::{BridgeError, Result};

#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    pub default_lang: String,
    pub cache_expiry: Duration,
    pub enforce_cache_expiry: bool,
    pub search_result_limit: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            default_lang: "es".to_string(),
            cache_expiry: Duration::days(30),
            enforce_cache_expiry: false,
            search_result_limit: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongLyrics {
    pub lyrics: Option<String>,
    pub translation: Option<String>,
    pub cached: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextTranslation {
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub cached: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAvailability {
    pub lyrics_provider: bool,
    pub translation_provider: bool,
}

pub struct LyricsOrchestrator {
    store: Arc<dyn CacheStore>,
    lyrics_provider: Option<Arc<dyn LyricsProvider>>,
    translation_provider: Option<Arc<dyn TranslationProvider>>,
    settings: OrchestratorSettings,
}

impl LyricsOrchestrator {
    pub fn new(
        store: Arc<dyn CacheStore>,
        lyrics_provider: Option<Arc<dyn LyricsProvider>>,
        translation_provider: Option<Arc<dyn TranslationProvider>>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            store,
            lyrics_provider,
            translation_provider,
            settings,
        }
    }

    pub fn availability(&self) -> ProviderAvailability {
        ProviderAvailability {
            lyrics_provider: self.lyrics_provider.is_some(),
            translation_provider: self.translation_provider.is_some(),
        }
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Flow A: lyrics plus translation for one song, best effort.
    pub async fn fetch_song(&self, artist: &str, title: &str, lang: Option<&str>) -> Result<SongLyrics> {
        let artist = artist.trim();
        let title = title.trim();
        if artist.is_empty() || title.is_empty() {
            return Err(BridgeError::InvalidRequest("artist and title parameters are required".into()));
        }
        let lang = self.resolve_lang(lang);

        match self.store.get_song_entry(artist, title, &lang).await {
            Ok(Some(entry)) if self.is_fresh(entry.updated_at) => {
                debug!("Cache hit for: {} - {} [{}]", artist, title, lang);
                return Ok(SongLyrics {
                    lyrics: entry.lyrics,
                    translation: entry.translation,
                    cached: true,
                });
            }
            Ok(Some(_)) => debug!("Cache entry expired for: {} - {} [{}]", artist, title, lang),
            Ok(None) => debug!("Cache miss for: {} - {} [{}]", artist, title, lang),
            Err(e) => error!("Song cache read failed, continuing uncached: {}", e),
        }

        let mut lyrics = None;
        let mut translation = None;

        if let Some(provider) = &self.lyrics_provider {
            let query = format!("{} {}", artist, title);
            let search = ProviderOutcome::<Vec<TrackCandidate>>::from(provider.search_tracks(&query).await);

            match search {
                ProviderOutcome::Found(tracks) => {
                    let track_id = tracks[0].track_id;
                    debug!("Using track {} for: {} - {}", track_id, artist, title);

                    match ProviderOutcome::<String>::from(provider.get_lyrics_translation(track_id, &lang).await) {
                        ProviderOutcome::Found(text) => translation = Some(text),
                        ProviderOutcome::Absent => {
                            debug!("{} has no {} translation for track {}", provider.name(), lang, track_id)
                        }
                        ProviderOutcome::Failed(reason) => {
                            warn!("Could not get lyrics translation: {}", reason)
                        }
                    }

                    match ProviderOutcome::<String>::from(provider.get_lyrics(track_id).await) {
                        ProviderOutcome::Found(text) => lyrics = Some(text),
                        ProviderOutcome::Absent => debug!("{} has no lyrics for track {}", provider.name(), track_id),
                        ProviderOutcome::Failed(reason) => warn!("Could not get lyrics: {}", reason),
                    }
                }
                ProviderOutcome::Absent => info!("No tracks found for: {}", query),
                ProviderOutcome::Failed(reason) => warn!("Track search failed: {}", reason),
            }
        }

        if translation.is_none() {
            if let (Some(text), Some(provider)) = (lyrics.as_deref(), &self.translation_provider) {
                match ProviderOutcome::<String>::from(provider.translate(text, &lang).await) {
                    ProviderOutcome::Found(text) => translation = Some(text),
                    ProviderOutcome::Absent => debug!("{} returned no translation", provider.name()),
                    ProviderOutcome::Failed(reason) => warn!("Machine translation failed: {}", reason),
                }
            }
        }

        if lyrics.is_some() || translation.is_some() {
            if let Err(e) = self.store
                .upsert_song_entry(artist, title, &lang, lyrics.as_deref(), translation.as_deref())
                .await
            {
                error!("Failed to cache song entry for {} - {}: {}", artist, title, e);
            }
        }

        Ok(SongLyrics {
            lyrics,
            translation,
            cached: false,
        })
    }

    /// Flow B: translate a standalone piece of text.
    pub async fn translate_text(&self, text: &str, lang: Option<&str>) -> Result<TextTranslation> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BridgeError::InvalidRequest("text parameter is required".into()));
        }
        let lang = self.resolve_lang(lang);

        match self.store.get_text_translation(text, &lang).await {
            Ok(Some(entry)) if self.is_fresh(entry.updated_at) => {
                debug!("Translation cache hit [{}]", lang);
                return Ok(TextTranslation {
                    translation: Some(entry.translation),
                    error: None,
                    cached: true,
                });
            }
            Ok(_) => debug!("Translation cache miss [{}]", lang),
            Err(e) => error!("Translation cache read failed, continuing uncached: {}", e),
        }

        let provider = match &self.translation_provider {
            Some(provider) => provider,
            None => {
                return Ok(TextTranslation {
                    translation: None,
                    error: Some("Translation provider not available".to_string()),
                    cached: false,
                })
            }
        };

        let translation = match ProviderOutcome::<String>::from(provider.translate(text, &lang).await) {
            ProviderOutcome::Found(translation) => translation,
            ProviderOutcome::Absent => {
                debug!("{} returned no translation", provider.name());
                return Ok(Self::untranslated());
            }
            ProviderOutcome::Failed(reason) => {
                warn!("Text translation failed: {}", reason);
                return Ok(Self::untranslated());
            }
        };

        if let Err(e) = self.store.upsert_text_translation(text, &lang, &translation).await {
            error!("Failed to cache text translation: {}", e);
        }

        Ok(TextTranslation {
            translation: Some(translation),
            error: None,
            cached: false,
        })
    }

    /// Provider search used by `/search`; unlike the flows, failures surface.
    pub async fn search_tracks(&self, artist: &str, title: &str) -> Result<Vec<TrackCandidate>> {
        let artist = artist.trim();
        let title = title.trim();
        if artist.is_empty() || title.is_empty() {
            return Err(BridgeError::InvalidRequest("artist and title parameters are required".into()));
        }

        let provider = self.lyrics_provider
            .as_ref()
            .ok_or(BridgeError::ProviderUnavailable("Lyrics provider"))?;

        let mut tracks = provider.search_tracks(&format!("{} {}", artist, title)).await?;
        tracks.truncate(self.settings.search_result_limit);
        Ok(tracks)
    }

    fn untranslated() -> TextTranslation {
        TextTranslation {
            translation: None,
            error: Some("Could not translate the text".to_string()),
            cached: false,
        }
    }

    fn resolve_lang(&self, lang: Option<&str>) -> String {
        match lang.map(str::trim) {
            Some(lang) if !lang.is_empty() => lang.to_string(),
            _ => self.settings.default_lang.clone(),
        }
    }

    fn is_fresh(&self, updated_at: DateTime<Utc>) -> bool {
        !self.settings.enforce_cache_expiry || Utc::now() - updated_at <= self.settings.cache_expiry
    }
}
