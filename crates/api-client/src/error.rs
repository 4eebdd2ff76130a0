use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network failure, timeout, rejected credential or any other non-success response.
    #[error("The data provider is unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("The data provider does not know series '{0}'")]
    UnknownSeriesId(String),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),

    #[error("Invalid API client configuration: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the API key as a query parameter.
        let e = e.without_url();
        if e.is_timeout() {
            ApiError::ProviderUnavailable(format!("request timed out: {}", e))
        } else if e.is_decode() {
            ApiError::Deserialization(e.to_string())
        } else {
            ApiError::ProviderUnavailable(e.to_string())
        }
    }
}
