//! Command Line Interface module
//!
//! This module contains all CLI commands organized into logical submodules:
//! - `core`: Running the HTTP server and searching the lyrics provider
//! - `operations`: One-shot song lookups and text translations
//! - `management`: Configuration and cache inspection

pub mod core;
pub mod operations;
pub mod management;

pub use self::core::{search, serve};
pub use self::management::{cache, config};
pub use self::operations::{lyrics, translate};
