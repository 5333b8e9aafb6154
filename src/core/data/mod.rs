//! Data layer modules
//!
//! This module contains the SQLite-backed persistence for the song cache and
//! the text-translation cache.

pub mod database;

pub use database::{CacheDatabase, CacheStats, SongCacheEntry, TextTranslationEntry};
