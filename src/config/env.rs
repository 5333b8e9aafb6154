use std::env;
use std::path::PathBuf;
use crate::error::{Result, BridgeError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const DATABASE_PATH: &'static str = "LYRICS_BRIDGE_DATABASE_PATH";
    pub const BIND_ADDR: &'static str = "LYRICS_BRIDGE_BIND_ADDR";
    pub const PORT: &'static str = "LYRICS_BRIDGE_PORT";
    pub const DEFAULT_LANG: &'static str = "LYRICS_BRIDGE_DEFAULT_LANG";
    pub const CACHE_EXPIRY_DAYS: &'static str = "LYRICS_BRIDGE_CACHE_EXPIRY_DAYS";
    pub const ENFORCE_CACHE_EXPIRY: &'static str = "LYRICS_BRIDGE_ENFORCE_CACHE_EXPIRY";
    pub const MUSIXMATCH_BASE_URL: &'static str = "LYRICS_BRIDGE_MUSIXMATCH_BASE_URL";
    pub const MUSIXMATCH_API_KEY: &'static str = "LYRICS_BRIDGE_MUSIXMATCH_API_KEY";
    pub const TRANSLATION_ENABLED: &'static str = "LYRICS_BRIDGE_TRANSLATION_ENABLED";
    pub const LIBRETRANSLATE_URL: &'static str = "LYRICS_BRIDGE_LIBRETRANSLATE_URL";
    pub const LIBRETRANSLATE_API_KEY: &'static str = "LYRICS_BRIDGE_LIBRETRANSLATE_API_KEY";
    pub const REQUEST_TIMEOUT_SECS: &'static str = "LYRICS_BRIDGE_REQUEST_TIMEOUT_SECS";
    pub const SEARCH_RESULT_LIMIT: &'static str = "LYRICS_BRIDGE_SEARCH_RESULT_LIMIT";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as string with validation
    pub fn parse_string(var_name: &str, validator: Option<fn(&str) -> Result<()>>) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }

                if let Some(validate_fn) = validator {
                    validate_fn(&trimmed)?;
                }

                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(BridgeError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    /// Parse environment variable as PathBuf
    pub fn parse_path(var_name: &str) -> Result<Option<PathBuf>> {
        Ok(Self::parse_string(var_name, None)?.map(PathBuf::from))
    }

    /// Parse environment variable as boolean with validation
    pub fn parse_bool(var_name: &str) -> Result<Option<bool>> {
        if let Some(value_str) = Self::parse_string(var_name, None)? {
            match value_str.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Some(true)),
                "false" | "0" | "no" | "off" => Ok(Some(false)),
                _ => Err(BridgeError::Validation(format!(
                    "Invalid boolean value in {}: '{}'. Use: true/false, 1/0, yes/no, on/off",
                    var_name, value_str
                )))
            }
        } else {
            Ok(None)
        }
    }

    /// Parse environment variable as u64 with range validation
    pub fn parse_u64(var_name: &str, min: u64, max: u64) -> Result<Option<u64>> {
        if let Some(value_str) = Self::parse_string(var_name, None)? {
            let value = value_str.parse::<u64>().map_err(|_| {
                BridgeError::Validation(format!(
                    "Invalid number in {}: '{}'. Must be a positive integer",
                    var_name, value_str
                ))
            })?;

            if value < min || value > max {
                return Err(BridgeError::Validation(format!(
                    "Value in {} must be between {} and {}, got {}",
                    var_name, min, max, value
                )));
            }

            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Parse environment variable as a TCP port
    pub fn parse_port(var_name: &str) -> Result<Option<u16>> {
        Ok(Self::parse_u64(var_name, 1, u16::MAX as u64)?.map(|port| port as u16))
    }

    /// Get all LYRICS_BRIDGE environment variables for debugging
    pub fn get_all_vars() -> Vec<(String, String)> {
        env::vars()
            .filter(|(key, _)| key.starts_with("LYRICS_BRIDGE_"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_bool() {
        env::set_var("TEST_LB_BOOL_TRUE", "yes");
        env::set_var("TEST_LB_BOOL_FALSE", "0");
        env::set_var("TEST_LB_BOOL_INVALID", "maybe");

        assert_eq!(EnvParser::parse_bool("TEST_LB_BOOL_TRUE").unwrap(), Some(true));
        assert_eq!(EnvParser::parse_bool("TEST_LB_BOOL_FALSE").unwrap(), Some(false));
        assert!(EnvParser::parse_bool("TEST_LB_BOOL_INVALID").is_err());
        assert_eq!(EnvParser::parse_bool("TEST_LB_BOOL_NOT_SET").unwrap(), None);

        env::remove_var("TEST_LB_BOOL_TRUE");
        env::remove_var("TEST_LB_BOOL_FALSE");
        env::remove_var("TEST_LB_BOOL_INVALID");
    }

    #[test]
    fn test_parse_port() {
        env::set_var("TEST_LB_PORT_VALID", "5000");
        env::set_var("TEST_LB_PORT_ZERO", "0");
        env::set_var("TEST_LB_PORT_HUGE", "70000");

        assert_eq!(EnvParser::parse_port("TEST_LB_PORT_VALID").unwrap(), Some(5000));
        assert!(EnvParser::parse_port("TEST_LB_PORT_ZERO").is_err());
        assert!(EnvParser::parse_port("TEST_LB_PORT_HUGE").is_err());
        assert_eq!(EnvParser::parse_port("TEST_LB_PORT_NOT_SET").unwrap(), None);

        env::remove_var("TEST_LB_PORT_VALID");
        env::remove_var("TEST_LB_PORT_ZERO");
        env::remove_var("TEST_LB_PORT_HUGE");
    }

    #[test]
    fn test_blank_string_is_unset() {
        env::set_var("TEST_LB_BLANK", "   ");
        assert_eq!(EnvParser::parse_string("TEST_LB_BLANK", None).unwrap(), None);
        env::remove_var("TEST_LB_BLANK");
    }
}
