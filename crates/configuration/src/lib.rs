// Declare the modules that make up this crate.
pub mod credentials;
pub mod error;
pub mod logging;
pub mod registry;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use credentials::{load_api_key, ApiKey};
pub use error::{ConfigError, RegistryError};
pub use logging::init_tracing;
pub use registry::{EconomySeriesConfig, SeriesRef, SeriesRegistry};
pub use settings::{CacheConfig, Config, LoggingConfig, ProviderConfig};

/// Prefix for environment overrides, e.g. `MACRO_DASH__CACHE__TTL=10m`.
const ENV_PREFIX: &str = "MACRO_DASH";

/// Loads the application configuration from an optional `config.toml` file.
///
/// Values from the file are layered under `MACRO_DASH__*` environment
/// variables, then deserialized into our strongly-typed `Config` struct and
/// validated. A missing file yields the defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config.toml")
}

pub fn load_config_from(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

impl Config {
    /// Builds the immutable series registry from the configured economies.
    pub fn registry(&self) -> Result<SeriesRegistry, ConfigError> {
        let registry = SeriesRegistry::new(self.economies.clone())?;
        tracing::debug!(economies = registry.len(), "Series registry built.");
        Ok(registry)
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let window = &config.window;
    if window.display_years == 0 {
        return Err(ConfigError::ValidationError(
            "window.display_years must be at least 1".to_string(),
        ));
    }
    if window.fetch_years < window.display_years {
        return Err(ConfigError::ValidationError(format!(
            "window.fetch_years ({}) must not be shorter than window.display_years ({})",
            window.fetch_years, window.display_years
        )));
    }
    if config.provider.timeout.is_zero() {
        return Err(ConfigError::ValidationError(
            "provider.timeout must be greater than zero".to_string(),
        ));
    }
    // Surfaces duplicate or blank economy entries at load time.
    config.registry()?;
    Ok(())
}
