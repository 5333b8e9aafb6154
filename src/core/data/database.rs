//! SQLite persistence for the song and text-translation caches
//!
//! Both tables are keyed by their natural key (no case folding, no
//! normalization). Writes replace the whole row so the last writer wins.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{DatabaseError, Result};

const CURRENT_DB_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct SongCacheEntry {
    pub artist: String,
    pub title: String,
    pub lang: String,
    pub lyrics: Option<String>,
    pub translation: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextTranslationEntry {
    pub text: String,
    pub lang: String,
    pub translation: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub song_entries: i64,
    pub songs_with_lyrics: i64,
    pub songs_with_translation: i64,
    pub text_entries: i64,
    pub oldest_entry: Option<DateTime<Utc>>,
    pub newest_entry: Option<DateTime<Utc>>,
}

pub struct CacheDatabase {
    conn: Connection,
}

impl CacheDatabase {
    pub fn open(db_path: &Path) -> Result<Self> {
        info!("Opening cache database at: {}", db_path.display());

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path).map_err(DatabaseError::Connection)?;

        // WAL lets readers proceed while a writer holds the lock
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::from_connection(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::Connection)?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        let existing_user_version: u32 =
            conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if existing_user_version < CURRENT_DB_VERSION {
            Self::upgrade_database(&mut conn, existing_user_version)?;
        }

        Ok(CacheDatabase { conn })
    }

    fn upgrade_database(conn: &mut Connection, existing_version: u32) -> Result<()> {
        debug!("Upgrading cache database from version {} to {}", existing_version, CURRENT_DB_VERSION);

        if existing_version == 0 {
            let tx = conn.transaction()?;

            tx.pragma_update(None, "user_version", CURRENT_DB_VERSION)?;

            tx.execute_batch(r#"
                CREATE TABLE IF NOT EXISTS song_cache (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    artist TEXT NOT NULL,
                    title TEXT NOT NULL,
                    lang TEXT NOT NULL,
                    lyrics TEXT,
                    translation TEXT,
                    updated_at TEXT NOT NULL,
                    UNIQUE(artist, title, lang)
                );

                CREATE TABLE IF NOT EXISTS translation_cache (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    text TEXT NOT NULL,
                    lang TEXT NOT NULL,
                    translation TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    UNIQUE(text, lang)
                );

                CREATE INDEX IF NOT EXISTS idx_song_cache_key ON song_cache(artist, title, lang);
                CREATE INDEX IF NOT EXISTS idx_translation_cache_key ON translation_cache(text, lang);
            "#)
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;

            tx.commit()?;
        }

        info!("Cache database schema at version {}", CURRENT_DB_VERSION);
        Ok(())
    }

    pub fn get_song_entry(&self, artist: &str, title: &str, lang: &str) -> Result<Option<SongCacheEntry>> {
        let row = self.conn
            .query_row(
                r#"
                SELECT lyrics, translation, updated_at
                FROM song_cache
                WHERE artist = ?1 AND title = ?2 AND lang = ?3
                "#,
                params![artist, title, lang],
                |row| {
                    Ok((
                        row.get::<_, Option<String>>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((lyrics, translation, updated_at)) => Ok(Some(SongCacheEntry {
                artist: artist.to_string(),
                title: title.to_string(),
                lang: lang.to_string(),
                lyrics,
                translation,
                updated_at: parse_timestamp(&updated_at)?,
            })),
            None => Ok(None),
        }
    }

    pub fn upsert_song_entry(
        &self,
        artist: &str,
        title: &str,
        lang: &str,
        lyrics: Option<&str>,
        translation: Option<&str>,
    ) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO song_cache (artist, title, lang, lyrics, translation, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(artist, title, lang) DO UPDATE SET
                lyrics = excluded.lyrics,
                translation = excluded.translation,
                updated_at = excluded.updated_at
            "#,
            params![artist, title, lang, lyrics, translation, Utc::now().to_rfc3339()],
        )?;
        debug!("Cached song entry for: {} - {} [{}]", artist, title, lang);
        Ok(())
    }

    pub fn get_text_translation(&self, text: &str, lang: &str) -> Result<Option<TextTranslationEntry>> {
        let row = self.conn
            .query_row(
                "SELECT translation, updated_at FROM translation_cache WHERE text = ?1 AND lang = ?2",
                params![text, lang],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            Some((translation, updated_at)) => Ok(Some(TextTranslationEntry {
                text: text.to_string(),
                lang: lang.to_string(),
                translation,
                updated_at: parse_timestamp(&updated_at)?,
            })),
            None => Ok(None),
        }
    }

    pub fn upsert_text_translation(&self, text: &str, lang: &str, translation: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO translation_cache (text, lang, translation, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(text, lang) DO UPDATE SET
                translation = excluded.translation,
                updated_at = excluded.updated_at
            "#,
            params![text, lang, translation, Utc::now().to_rfc3339()],
        )?;
        debug!("Cached text translation [{}] ({} chars)", lang, text.chars().count());
        Ok(())
    }

    pub fn stats(&self) -> Result<CacheStats> {
        let (song_entries, songs_with_lyrics, songs_with_translation) = self.conn.query_row(
            r#"
            SELECT COUNT(*),
                   COUNT(lyrics),
                   COUNT(translation)
            FROM song_cache
            "#,
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        let text_entries: i64 =
            self.conn.query_row("SELECT COUNT(*) FROM translation_cache", [], |row| row.get(0))?;

        let (oldest, newest): (Option<String>, Option<String>) = self.conn.query_row(
            r#"
            SELECT MIN(updated_at), MAX(updated_at) FROM (
                SELECT updated_at FROM song_cache
                UNION ALL
                SELECT updated_at FROM translation_cache
            )
            "#,
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(CacheStats {
            song_entries,
            songs_with_lyrics,
            songs_with_translation,
            text_entries,
            oldest_entry: oldest.as_deref().map(parse_timestamp).transpose()?,
            newest_entry: newest.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DatabaseError::Timestamp(value.to_string()).into())
}
