//! Error handling for the lyrics-bridge service
//!
//! This module provides a hierarchical error system. Storage, network and
//! configuration failures each have their own typed enum, and the top-level
//! `BridgeError` carries the request-level variants that the HTTP boundary
//! maps onto status codes.

use rusqlite::ffi;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0} is not available")]
    ProviderUnavailable(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("Query failed: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Database corruption detected")]
    Corruption,

    #[error("Invalid timestamp stored: {0}")]
    Timestamp(String),

    #[error("Storage task failed: {0}")]
    Task(String),

    #[error("Database lock poisoned")]
    Poisoned,
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API rate limit exceeded")]
    RateLimit,

    #[error("API response invalid: {reason}")]
    InvalidResponse { reason: String },

    #[error("Authentication failed")]
    Authentication,

    #[error("Service unavailable")]
    ServiceUnavailable,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Environment variable error: {0}")]
    Environment(#[from] std::env::VarError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single failed call to an upstream provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider}: {source}")]
    Network {
        provider: &'static str,
        #[source]
        source: NetworkError,
    },

    #[error("{provider} returned status {status}")]
    Status { provider: &'static str, status: u16 },
}

impl ProviderError {
    pub fn network(provider: &'static str, source: impl Into<NetworkError>) -> Self {
        ProviderError::Network {
            provider,
            source: source.into(),
        }
    }

    pub fn invalid_response(provider: &'static str, reason: impl Into<String>) -> Self {
        ProviderError::Network {
            provider,
            source: NetworkError::InvalidResponse {
                reason: reason.into(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

impl BridgeError {
    /// HTTP status used when this error reaches the web boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            BridgeError::InvalidRequest(_) => 400,
            BridgeError::ProviderUnavailable(_) => 503,
            _ => 500,
        }
    }
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ffi::Error { code: ffi::ErrorCode::DatabaseCorrupt, .. }, _) => {
                DatabaseError::Corruption
            }
            _ => DatabaseError::Query(err),
        }
    }
}

impl From<rusqlite::Error> for BridgeError {
    fn from(err: rusqlite::Error) -> Self {
        BridgeError::Database(err.into())
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Config(ConfigError::Io(err))
    }
}

impl From<toml::de::Error> for BridgeError {
    fn from(err: toml::de::Error) -> Self {
        BridgeError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<tokio::task::JoinError> for BridgeError {
    fn from(err: tokio::task::JoinError) -> Self {
        BridgeError::Database(DatabaseError::Task(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BridgeError::InvalidRequest("missing".into()).status_code(), 400);
        assert_eq!(BridgeError::ProviderUnavailable("Musixmatch").status_code(), 503);
        assert_eq!(BridgeError::Internal(anyhow::anyhow!("boom")).status_code(), 500);
        assert_eq!(BridgeError::Database(DatabaseError::Corruption).status_code(), 500);
    }

    #[test]
    fn test_corruption_is_detected() {
        let err = rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_CORRUPT),
            Some("database disk image is malformed".into()),
        );
        assert!(matches!(DatabaseError::from(err), DatabaseError::Corruption));

        let err = rusqlite::Error::InvalidQuery;
        assert!(matches!(DatabaseError::from(err), DatabaseError::Query(_)));
    }

    #[test]
    fn test_provider_error_messages() {
        let err = ProviderError::Status { provider: "LibreTranslate", status: 502 };
        assert_eq!(err.to_string(), "LibreTranslate returned status 502");

        let err = ProviderError::invalid_response("Musixmatch", "missing body");
        assert_eq!(err.to_string(), "Musixmatch: API response invalid: missing body");
    }
}
