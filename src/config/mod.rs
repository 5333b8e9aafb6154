//! Service configuration
//!
//! Values come from, in increasing priority: built-in defaults, the TOML
//! config file, a `.env` file and `LYRICS_BRIDGE_*` environment variables.

pub mod env;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::env as std_env;
use std::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::core::services::musixmatch::SEARCH_PAGE_SIZE;
use crate::error::{BridgeError, ConfigError, Result};
use self::env::{EnvParser, EnvVars};
use self::validation::ConfigValidator;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite cache file path
    pub database_path: PathBuf,

    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Port the HTTP server listens on
    pub port: u16,

    /// Target language used when a request omits `lang`
    pub default_lang: String,

    /// Nominal lifetime of cached songs and translations
    pub cache_expiry_days: u64,

    /// Treat rows older than `cache_expiry_days` as cache misses
    pub enforce_cache_expiry: bool,

    /// Musixmatch API base URL
    pub musixmatch_base_url: String,

    /// Musixmatch API key; the lyrics provider is disabled without one
    pub musixmatch_api_key: Option<String>,

    /// Enable the machine translation provider
    pub translation_enabled: bool,

    /// LibreTranslate instance URL
    pub libretranslate_url: String,

    /// LibreTranslate API key (optional, required by some instances)
    pub libretranslate_api_key: Option<String>,

    /// Timeout applied to every upstream provider request
    pub request_timeout_secs: u64,

    /// Maximum number of candidates returned by `/search`
    pub search_result_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        // Use /data only when explicitly running under Docker (DOCKER env var)
        let default_data_path = if std_env::var("DOCKER").is_ok() {
            PathBuf::from("/data")
        } else {
            match ProjectDirs::from("net", "lyrics-bridge", "lyrics-bridge") {
                Some(project_dirs) => project_dirs.data_dir().to_path_buf(),
                None => {
                    warn!("ProjectDirs unavailable; falling back to current directory for data path");
                    PathBuf::from(".")
                }
            }
        };

        Self {
            database_path: default_data_path.join("lyrics_cache.db"),
            bind_addr: "127.0.0.1".to_string(),
            port: 5000,
            default_lang: "es".to_string(),
            cache_expiry_days: 30,
            enforce_cache_expiry: false,
            musixmatch_base_url: "https://api.musixmatch.com/ws/1.1".to_string(),
            musixmatch_api_key: None,
            translation_enabled: true,
            libretranslate_url: "https://libretranslate.de".to_string(),
            libretranslate_api_key: None,
            request_timeout_secs: 10,
            search_result_limit: 5,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        match config_path {
            Some(path) => {
                let config_file = PathBuf::from(path);
                if !config_file.exists() {
                    return Err(ConfigError::FileNotFound { path: config_file }.into());
                }
                Self::load_from_path(&config_file)
            }
            None => Self::load_from_path(&Self::default_config_path()?),
        }
    }

    /// Reads `config_file`, writing it out first when missing. The file is
    /// written before environment overrides apply so secrets passed through
    /// the environment never reach disk.
    fn load_from_path(config_file: &Path) -> Result<Self> {
        let mut config = if config_file.exists() {
            debug!("Loading configuration from {}", config_file.display());
            Self::from_file(config_file)?
        } else {
            let config = Self::default();
            if let Some(parent) = config_file.parent() {
                fs::create_dir_all(parent)?;
            }
            config.save(config_file)?;
            config
        };

        // Environment variables have the highest priority
        config.load_from_env()?;
        config.validate()?;

        if let Some(parent) = config.database_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_env(&mut self) -> Result<()> {
        if let Some(path) = EnvParser::parse_path(EnvVars::DATABASE_PATH)? {
            self.database_path = path;
        }

        if let Some(addr) = EnvParser::parse_string(EnvVars::BIND_ADDR, None)? {
            self.bind_addr = addr;
        }

        if let Some(port) = EnvParser::parse_port(EnvVars::PORT)? {
            self.port = port;
        }

        if let Some(lang) = EnvParser::parse_string(EnvVars::DEFAULT_LANG, Some(ConfigValidator::validate_lang))? {
            self.default_lang = lang;
        }

        if let Some(days) = EnvParser::parse_u64(EnvVars::CACHE_EXPIRY_DAYS, 1, 3650)? {
            self.cache_expiry_days = days;
        }

        if let Some(enforce) = EnvParser::parse_bool(EnvVars::ENFORCE_CACHE_EXPIRY)? {
            self.enforce_cache_expiry = enforce;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::MUSIXMATCH_BASE_URL, None)? {
            self.musixmatch_base_url = url;
        }

        if let Some(key) = EnvParser::parse_string(EnvVars::MUSIXMATCH_API_KEY, None)? {
            self.musixmatch_api_key = Some(key);
        }

        if let Some(enabled) = EnvParser::parse_bool(EnvVars::TRANSLATION_ENABLED)? {
            self.translation_enabled = enabled;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::LIBRETRANSLATE_URL, None)? {
            self.libretranslate_url = url;
        }

        if let Some(key) = EnvParser::parse_string(EnvVars::LIBRETRANSLATE_API_KEY, None)? {
            self.libretranslate_api_key = Some(key);
        }

        if let Some(secs) = EnvParser::parse_u64(EnvVars::REQUEST_TIMEOUT_SECS, 1, 300)? {
            self.request_timeout_secs = secs;
        }

        if let Some(limit) = EnvParser::parse_u64(EnvVars::SEARCH_RESULT_LIMIT, 1, SEARCH_PAGE_SIZE as u64)? {
            self.search_result_limit = limit as usize;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_db_path(&self.database_path)?;
        ConfigValidator::validate_lang(&self.default_lang)?;
        ConfigValidator::validate_url(&self.musixmatch_base_url, "Musixmatch")?;
        ConfigValidator::validate_url(&self.libretranslate_url, "LibreTranslate")?;
        ConfigValidator::validate_range(self.cache_expiry_days, 1, 3650, "cache_expiry_days")?;
        ConfigValidator::validate_range(self.request_timeout_secs, 1, 300, "request_timeout_secs")?;
        ConfigValidator::validate_range(self.search_result_limit, 1, SEARCH_PAGE_SIZE, "search_result_limit")?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::from)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("net", "lyrics-bridge", "lyrics-bridge")
            .ok_or_else(|| BridgeError::Validation("Failed to determine project directories".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_config_path()
    }

    /// True when the lyrics provider can be constructed.
    pub fn musixmatch_configured(&self) -> bool {
        self.musixmatch_api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}
