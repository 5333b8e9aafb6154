use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::core::data::{CacheDatabase, CacheStats, SongCacheEntry, TextTranslationEntry};
use crate::error::{DatabaseError, Result};

/// Durable cache contract consumed by the orchestrator.
///
/// `Ok(None)` means the key is absent; `Err(_)` means the store itself failed.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get_song_entry(&self, artist: &str, title: &str, lang: &str) -> Result<Option<SongCacheEntry>>;

    async fn upsert_song_entry(
        &self,
        artist: &str,
        title: &str,
        lang: &str,
        lyrics: Option<&str>,
        translation: Option<&str>,
    ) -> Result<()>;

    async fn get_text_translation(&self, text: &str, lang: &str) -> Result<Option<TextTranslationEntry>>;

    async fn upsert_text_translation(&self, text: &str, lang: &str, translation: &str) -> Result<()>;

    async fn stats(&self) -> Result<CacheStats>;
}

/// `CacheStore` backed by a single SQLite connection.
///
/// rusqlite is blocking, so every call hops onto the blocking pool.
#[derive(Clone)]
pub struct SqliteCacheStore {
    database: Arc<Mutex<CacheDatabase>>,
}

impl SqliteCacheStore {
    pub fn new(database: CacheDatabase) -> Self {
        Self {
            database: Arc::new(Mutex::new(database)),
        }
    }

    pub fn open(db_path: &Path) -> Result<Self> {
        Ok(Self::new(CacheDatabase::open(db_path)?))
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(CacheDatabase::open_in_memory()?))
    }

    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&CacheDatabase) -> Result<T> + Send + 'static,
    {
        let database = self.database.clone();
        tokio::task::spawn_blocking(move || {
            let guard = database.lock().map_err(|_| DatabaseError::Poisoned)?;
            op(&guard)
        })
        .await?
    }
}

#[async_trait]
impl CacheStore for SqliteCacheStore {
    async fn get_song_entry(&self, artist: &str, title: &str, lang: &str) -> Result<Option<SongCacheEntry>> {
        let (artist, title, lang) = (artist.to_string(), title.to_string(), lang.to_string());
        self.with_db(move |db| db.get_song_entry(&artist, &title, &lang)).await
    }

    async fn upsert_song_entry(
        &self,
        artist: &str,
        title: &str,
        lang: &str,
        lyrics: Option<&str>,
        translation: Option<&str>,
    ) -> Result<()> {
        let (artist, title, lang) = (artist.to_string(), title.to_string(), lang.to_string());
        let lyrics = lyrics.map(str::to_string);
        let translation = translation.map(str::to_string);
        self.with_db(move |db| {
            db.upsert_song_entry(&artist, &title, &lang, lyrics.as_deref(), translation.as_deref())
        })
        .await
    }

    async fn get_text_translation(&self, text: &str, lang: &str) -> Result<Option<TextTranslationEntry>> {
        let (text, lang) = (text.to_string(), lang.to_string());
        self.with_db(move |db| db.get_text_translation(&text, &lang)).await
    }

    async fn upsert_text_translation(&self, text: &str, lang: &str, translation: &str) -> Result<()> {
        let (text, lang, translation) = (text.to_string(), lang.to_string(), translation.to_string());
        self.with_db(move |db| db.upsert_text_translation(&text, &lang, &translation)).await
    }

    async fn stats(&self) -> Result<CacheStats> {
        self.with_db(|db| db.stats()).await
    }
}
