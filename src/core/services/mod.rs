//! External services integration
//!
//! This module contains the upstream provider contracts and their clients:
//! - Musixmatch API client for track search, lyrics and crowd translations
//! - LibreTranslate client for machine translation

pub mod libretranslate;
pub mod musixmatch;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ProviderError;

pub use libretranslate::LibreTranslateClient;
pub use musixmatch::MusixmatchClient;

/// A search hit from the lyrics provider. Only `track_id` is interpreted;
/// every other field is passed through to `/search` callers untouched.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TrackCandidate {
    pub track_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
impl TrackCandidate {
    pub fn new(track_id: i64) -> Self {
        Self {
            track_id,
            track_name: None,
            artist_name: None,
            album_name: None,
            extra: Map::new(),
        }
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[async_trait]
pub trait LyricsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search_tracks(&self, query: &str) -> ProviderResult<Vec<TrackCandidate>>;

    async fn get_lyrics(&self, track_id: i64) -> ProviderResult<Option<String>>;

    /// Pre-made translation of a track's lyrics. `Ok(None)` when the
    /// provider has none in `lang`.
    async fn get_lyrics_translation(&self, track_id: i64, lang: &str) -> ProviderResult<Option<String>>;
}

#[async_trait]
pub trait TranslationProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn translate(&self, text: &str, target_lang: &str) -> ProviderResult<Option<String>>;
}

/// Result of one isolated provider call, reduced to data.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome<T> {
    Found(T),
    Absent,
    Failed(String),
}

impl From<ProviderResult<Option<String>>> for ProviderOutcome<String> {
    fn from(result: ProviderResult<Option<String>>) -> Self {
        match result {
            Ok(Some(text)) if !text.trim().is_empty() => ProviderOutcome::Found(text),
            Ok(_) => ProviderOutcome::Absent,
            Err(e) => ProviderOutcome::Failed(e.to_string()),
        }
    }
}

impl From<ProviderResult<Vec<TrackCandidate>>> for ProviderOutcome<Vec<TrackCandidate>> {
    fn from(result: ProviderResult<Vec<TrackCandidate>>) -> Self {
        match result {
            Ok(tracks) if !tracks.is_empty() => ProviderOutcome::Found(tracks),
            Ok(_) => ProviderOutcome::Absent,
            Err(e) => ProviderOutcome::Failed(e.to_string()),
        }
    }
}
