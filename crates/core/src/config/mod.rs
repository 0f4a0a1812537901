//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (APOD_*)
//! 2. TOML config file (if APOD_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (APOD_*)
/// 2. TOML config file (if APOD_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// NASA API key.
    ///
    /// Set via APOD_API_KEY environment variable. `DEMO_KEY` works with a
    /// low hourly quota.
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// APOD endpoint.
    ///
    /// Set via APOD_API_BASE_URL environment variable.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Directory under which the image cache directory is created.
    ///
    /// Set via APOD_CACHE_ROOT environment variable.
    #[serde(default = "default_cache_root")]
    pub cache_root: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via APOD_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum image size in bytes.
    ///
    /// Set via APOD_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via APOD_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_api_key() -> String {
    "DEMO_KEY".into()
}

fn default_api_base_url() -> String {
    "https://api.nasa.gov/planetary/apod".into()
}

fn default_cache_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_user_agent() -> String {
    "apod-cache/0.1".into()
}

fn default_max_bytes() -> usize {
    52_428_800 // 50MB
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            api_base_url: default_api_base_url(),
            cache_root: default_cache_root(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `APOD_`
    /// 2. TOML file from `APOD_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("APOD_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("APOD_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into()),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_key, "DEMO_KEY");
        assert_eq!(config.api_base_url, "https://api.nasa.gov/planetary/apod");
        assert_eq!(config.cache_root, PathBuf::from("."));
        assert_eq!(config.user_agent, "apod-cache/0.1");
        assert_eq!(config.max_bytes, 52_428_800);
        assert_eq!(config.timeout_ms, 30_000);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(30_000));
    }

    #[test]
    fn test_toml_layer_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("apod.toml", "api_key = \"from-file\"\ntimeout_ms = 5000")?;
            jail.set_env("APOD_CONFIG_FILE", "apod.toml");
            jail.set_env("APOD_TIMEOUT_MS", "7000");

            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.api_key, "from-file");
            assert_eq!(config.timeout_ms, 7000);
            assert_eq!(config.user_agent, "apod-cache/0.1");
            Ok(())
        });
    }
}
