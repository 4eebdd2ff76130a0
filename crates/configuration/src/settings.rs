use crate::registry::{builtin_economies, EconomySeriesConfig};
use core_types::LookbackWindow;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; omitted sections fall back to
/// the defaults below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub cache: CacheConfig,
    pub window: LookbackWindow,
    pub logging: LoggingConfig,
    /// The tracked economies. Replaces the built-in table when present.
    pub economies: Vec<EconomySeriesConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            cache: CacheConfig::default(),
            window: LookbackWindow::default(),
            logging: LoggingConfig::default(),
            economies: builtin_economies(),
        }
    }
}

/// Connection settings for the FRED API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the FRED REST API, without a trailing slash.
    pub base_url: String,
    /// Upper bound on a single provider request. Expiry is reported as the
    /// provider being unavailable.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.stlouisfed.org/fred".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Settings for the in-memory fetch cache.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a fetched series is served from memory before it is fetched again.
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
