//! Provider and store doubles with call-count instrumentation

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::core::data::{CacheStats, SongCacheEntry, TextTranslationEntry};
use crate::core::infrastructure::CacheStore;
use crate::core::services::{LyricsProvider, ProviderResult, TrackCandidate, TranslationProvider};
use crate::error::{DatabaseError, NetworkError, ProviderError, Result};

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Text(&'static str),
    Absent,
    Fail,
}

impl Reply {
    fn into_result(self, provider: &'static str) -> ProviderResult<Option<String>> {
        match self {
            Reply::Text(text) => Ok(Some(text.to_string())),
            Reply::Absent => Ok(None),
            Reply::Fail => Err(ProviderError::network(provider, NetworkError::ServiceUnavailable)),
        }
    }
}

pub struct StubLyricsProvider {
    tracks: Option<Vec<i64>>,
    lyrics: Reply,
    translation: Reply,
    search_calls: AtomicUsize,
    lyrics_calls: AtomicUsize,
    translation_calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
    last_track_id: Mutex<Option<i64>>,
    last_lang: Mutex<Option<String>>,
}

impl StubLyricsProvider {
    pub fn with_tracks(track_ids: Vec<i64>, lyrics: Reply, translation: Reply) -> Self {
        Self {
            tracks: Some(track_ids),
            lyrics,
            translation,
            search_calls: AtomicUsize::new(0),
            lyrics_calls: AtomicUsize::new(0),
            translation_calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
            last_track_id: Mutex::new(None),
            last_lang: Mutex::new(None),
        }
    }

    pub fn with_track(track_id: i64, lyrics: Reply, translation: Reply) -> Self {
        Self::with_tracks(vec![track_id], lyrics, translation)
    }

    pub fn failing_search() -> Self {
        Self {
            tracks: None,
            ..Self::with_tracks(Vec::new(), Reply::Absent, Reply::Absent)
        }
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn lyrics_calls(&self) -> usize {
        self.lyrics_calls.load(Ordering::SeqCst)
    }

    pub fn translation_calls(&self) -> usize {
        self.translation_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.search_calls() + self.lyrics_calls() + self.translation_calls()
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }

    pub fn last_track_id(&self) -> Option<i64> {
        *self.last_track_id.lock().unwrap()
    }

    pub fn last_lang(&self) -> Option<String> {
        self.last_lang.lock().unwrap().clone()
    }
}

#[async_trait]
impl LyricsProvider for StubLyricsProvider {
    fn name(&self) -> &'static str {
        "StubLyrics"
    }

    async fn search_tracks(&self, query: &str) -> ProviderResult<Vec<TrackCandidate>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.to_string());

        match &self.tracks {
            Some(ids) => Ok(ids.iter().copied().map(TrackCandidate::new).collect()),
            None => Err(ProviderError::Status { provider: "StubLyrics", status: 502 }),
        }
    }

    async fn get_lyrics(&self, track_id: i64) -> ProviderResult<Option<String>> {
        self.lyrics_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_track_id.lock().unwrap() = Some(track_id);
        self.lyrics.into_result("StubLyrics")
    }

    async fn get_lyrics_translation(&self, track_id: i64, lang: &str) -> ProviderResult<Option<String>> {
        self.translation_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_track_id.lock().unwrap() = Some(track_id);
        *self.last_lang.lock().unwrap() = Some(lang.to_string());
        self.translation.into_result("StubLyrics")
    }
}

pub struct StubTranslator {
    reply: Reply,
    calls: AtomicUsize,
    last_input: Mutex<Option<(String, String)>>,
}

impl StubTranslator {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<(String, String)> {
        self.last_input.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationProvider for StubTranslator {
    fn name(&self) -> &'static str {
        "StubTranslator"
    }

    async fn translate(&self, text: &str, target_lang: &str) -> ProviderResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some((text.to_string(), target_lang.to_string()));
        self.reply.into_result("StubTranslator")
    }
}

/// A store whose every operation fails as if the database were corrupt.
pub struct FailingStore;

#[async_trait]
impl CacheStore for FailingStore {
    async fn get_song_entry(&self, _artist: &str, _title: &str, _lang: &str) -> Result<Option<SongCacheEntry>> {
        Err(DatabaseError::Corruption.into())
    }

    async fn upsert_song_entry(
        &self,
        _artist: &str,
        _title: &str,
        _lang: &str,
        _lyrics: Option<&str>,
        _translation: Option<&str>,
    ) -> Result<()> {
        Err(DatabaseError::Corruption.into())
    }

    async fn get_text_translation(&self, _text: &str, _lang: &str) -> Result<Option<TextTranslationEntry>> {
        Err(DatabaseError::Corruption.into())
    }

    async fn upsert_text_translation(&self, _text: &str, _lang: &str, _translation: &str) -> Result<()> {
        Err(DatabaseError::Corruption.into())
    }

    async fn stats(&self) -> Result<CacheStats> {
        Err(DatabaseError::Corruption.into())
    }
}
