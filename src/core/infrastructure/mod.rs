//! Infrastructure and cross-cutting concerns
//!
//! This module contains the async cache store the orchestrator talks to.

pub mod cache;

pub use cache::{CacheStore, SqliteCacheStore};
