//! Core functionality modules
//!
//! This module contains all core business logic organized into logical layers:
//! - `data`: SQLite persistence for the two caches
//! - `services`: Upstream provider contracts and clients
//! - `infrastructure`: Async cache store consumed by the orchestrator
//! - `orchestrator`: The song and text translation request flows

pub mod data;
pub mod infrastructure;
pub mod orchestrator;
pub mod services;

#[cfg(test)]
pub mod testing;

pub use orchestrator::{LyricsOrchestrator, OrchestratorSettings};
