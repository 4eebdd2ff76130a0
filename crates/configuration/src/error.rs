use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from file: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    #[error("Missing credential: {0} must be set in the environment or a .env file")]
    MissingCredential(&'static str),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

/// Failures of a registry lookup. These indicate a caller bug or bad user input,
/// never a provider problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown economy: '{0}'")]
    UnknownEconomy(String),

    #[error("Unknown indicator: '{0}'")]
    UnknownIndicator(String),
}
