use crate::DEFAULT_BACKEND_URL;
use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

pub const ENV_BACKEND_URL: &str = "BACKEND_URL";
pub const ENV_USE_BACKEND_SEARCH: &str = "USE_BACKEND_SEARCH";
pub const ENV_UPSTREAM_TIMEOUT_MS: &str = "NEWS_UPSTREAM_TIMEOUT_MS";
pub const ENV_LATEST_LIMIT: &str = "NEWS_LATEST_LIMIT";
pub const ENV_BIND_ADDR: &str = "NEWSGATE_BIND_ADDR";
pub const ENV_LOG_DIR: &str = "NEWSGATE_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "NEWSGATE_LOG_LEVEL";
pub const ENV_FALLBACK_CORPUS: &str = "NEWS_FALLBACK_CORPUS";
pub const ENV_CONFIG_FILE: &str = "NEWSGATE_CONFIG";

const MAX_UPSTREAM_TIMEOUT_MS: u64 = 60_000;
const MAX_LATEST_LIMIT: u32 = 100;

// ============================================
// CONFIG STRUCT
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Gate for the upstream search call. Off means POST always searches locally.
    #[serde(default = "default_use_backend_search")]
    pub use_backend_search: bool,

    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,

    /// Page size requested from the `latest` endpoint for anonymous callers.
    #[serde(default = "default_latest_limit")]
    pub latest_limit: u32,

    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub fallback_corpus_path: Option<PathBuf>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            use_backend_search: default_use_backend_search(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
            latest_limit: default_latest_limit(),
            bind_addr: default_bind_addr(),
            log_dir: default_log_dir(),
            log_level: None,
            fallback_corpus_path: None,
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}
fn default_use_backend_search() -> bool {
    true
}
fn default_upstream_timeout_ms() -> u64 {
    15_000
}
fn default_latest_limit() -> u32 {
    20
}
fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

// ============================================
// IMPLEMENTATION
// ============================================

impl GatewayConfig {
    /// Load config for the running process.
    ///
    /// Order: defaults, then the TOML file named by `NEWSGATE_CONFIG` (if any),
    /// then environment variables (a `.env` file is read first). The result is
    /// validated before it is returned.
    ///
    /// Runs before the logger exists, so it does not log; callers log
    /// [`Self::summary`] once logging is up.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is normal
        let _ = dotenvy::dotenv();

        let base = match std::env::var(ENV_CONFIG_FILE) {
            Ok(path) if !path.trim().is_empty() => Self::load_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };

        let config = base.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file. Missing keys take their defaults.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: GatewayConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    ///
    /// Unset or blank values keep the current setting.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_BACKEND_URL) {
            self.backend_url = url.trim().to_string();
        }

        // Anything other than an explicit "false" keeps backend search on
        if let Some(flag) = get(ENV_USE_BACKEND_SEARCH) {
            self.use_backend_search = !flag.trim().eq_ignore_ascii_case("false");
        }

        if let Some(raw) = get(ENV_UPSTREAM_TIMEOUT_MS) {
            self.upstream_timeout_ms = parse_env(ENV_UPSTREAM_TIMEOUT_MS, &raw)?;
        }

        if let Some(raw) = get(ENV_LATEST_LIMIT) {
            self.latest_limit = parse_env(ENV_LATEST_LIMIT, &raw)?;
        }

        if let Some(addr) = get(ENV_BIND_ADDR) {
            self.bind_addr = addr.trim().to_string();
        }

        if let Some(dir) = get(ENV_LOG_DIR) {
            self.log_dir = PathBuf::from(dir.trim());
        }

        if let Some(level) = get(ENV_LOG_LEVEL) {
            self.log_level = Some(level.trim().to_string());
        }

        if let Some(path) = get(ENV_FALLBACK_CORPUS) {
            self.fallback_corpus_path = Some(PathBuf::from(path.trim()));
        }

        Ok(self)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_url.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "backend_url cannot be empty".to_string(),
            });
        }

        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid backend URL format: {}", self.backend_url),
            });
        }

        if self.upstream_timeout_ms == 0 || self.upstream_timeout_ms > MAX_UPSTREAM_TIMEOUT_MS {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid upstream timeout: {}ms (must be 1-{MAX_UPSTREAM_TIMEOUT_MS})",
                    self.upstream_timeout_ms
                ),
            });
        }

        if self.latest_limit == 0 || self.latest_limit > MAX_LATEST_LIMIT {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid latest limit: {} (must be 1-{MAX_LATEST_LIMIT})",
                    self.latest_limit
                ),
            });
        }

        if self.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid bind address: {}", self.bind_addr),
            });
        }

        if let Some(level) = &self.log_level {
            if LevelFilter::from_str(level).is_err() {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("Invalid log level: {level}"),
                });
            }
        }

        Ok(())
    }

    /// One-line description of the effective settings. Contains no secrets.
    pub fn summary(&self) -> String {
        format!(
            "backend={} backend_search={} timeout={}ms latest_limit={} bind={} fallback_corpus={}",
            self.backend_url,
            if self.use_backend_search { "enabled" } else { "disabled" },
            self.upstream_timeout_ms,
            self.latest_limit,
            self.bind_addr,
            self.fallback_corpus_path
                .as_deref()
                .map_or_else(|| String::from("bundled"), |p| p.display().to_string()),
        )
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    /// Configured log level, if one was set and parses.
    pub fn log_level_filter(&self) -> Option<LevelFilter> {
        self.log_level
            .as_deref()
            .and_then(|level| LevelFilter::from_str(level).ok())
    }
}

#[track_caller]
fn parse_env<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::EnvError {
        location: ErrorLocation::from(Location::caller()),
        key: key.to_string(),
        reason: format!("'{raw}': {e}"),
    })
}
