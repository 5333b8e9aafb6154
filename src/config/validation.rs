use std::path::Path;
use url::Url;
use crate::error::{Result, BridgeError};

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a URL string
    pub fn validate_url(url: &str, field_name: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| {
            BridgeError::Validation(format!("Invalid {} URL '{}': {}", field_name, url, e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(BridgeError::Validation(format!(
                "{} URL must use http or https, got: {}",
                field_name, url
            )));
        }
        Ok(())
    }

    /// Validate numeric range
    pub fn validate_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(BridgeError::Validation(format!(
                "{} must be between {} and {}, got {}",
                field_name, min, max, value
            )));
        }
        Ok(())
    }

    /// Validate a language code such as `es`, `pt-BR` or `zh_Hans`
    pub fn validate_lang(lang: &str) -> Result<()> {
        let valid = !lang.is_empty()
            && lang.len() <= 16
            && lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(BridgeError::Validation(format!(
                "Invalid language code: '{}'",
                lang
            )));
        }
        Ok(())
    }

    /// Validate database file extension
    pub fn validate_db_path(path: &Path) -> Result<()> {
        if let Some(ext) = path.extension() {
            if ext != "db" && ext != "sqlite" && ext != "sqlite3" {
                return Err(BridgeError::Validation(format!(
                    "Database file should have .db, .sqlite, or .sqlite3 extension, got: {}",
                    path.display()
                )));
            }
        } else {
            return Err(BridgeError::Validation(format!(
                "Database file should have an extension (.db, .sqlite, .sqlite3), got: {}",
                path.display()
            )));
        }
        Ok(())
    }
}
