//! Management commands: configuration and cache inspection.

pub mod config;
pub mod cache;
