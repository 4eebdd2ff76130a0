use crate::error::ConfigError;
use std::env;
use std::fmt;

/// The environment variable holding the FRED API key.
pub const API_KEY_VAR: &str = "FRED_API_KEY";

/// A provider API key. The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(ConfigError::MissingCredential(API_KEY_VAR));
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Reads the API key from the environment. Any `.env` file must already be loaded.
///
/// A missing key is fatal: callers should stop before issuing any request.
pub fn load_api_key() -> Result<ApiKey, ConfigError> {
    api_key_from(env::var(API_KEY_VAR).ok())
}

fn api_key_from(value: Option<String>) -> Result<ApiKey, ConfigError> {
    value
        .ok_or(ConfigError::MissingCredential(API_KEY_VAR))
        .and_then(ApiKey::new)
}
