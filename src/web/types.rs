//! Request and response shapes for the HTTP boundary

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::services::TrackCandidate;
use crate::core::LyricsOrchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<LyricsOrchestrator>,
}

/// Query parameters are optional at the type level so that a missing one
/// is reported as a 400 JSON body rather than an extractor rejection.
#[derive(Deserialize, Debug, Default)]
pub struct SongQuery {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub lang: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct TextQuery {
    pub text: Option<String>,
    pub lang: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub status: &'static str,
    pub lyrics_provider: bool,
    pub translation_provider: bool,
}

#[derive(Serialize, Debug)]
pub struct SearchResponse {
    pub results: Vec<TrackCandidate>,
}
