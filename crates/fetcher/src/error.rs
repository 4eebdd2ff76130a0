use api_client::error::ApiError;
use thiserror::Error;

/// A failed fetch of one series. Every variant is local to that series: the
/// caller reports "no data" for it and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Data provider unavailable while fetching '{series_id}': {reason}")]
    ProviderUnavailable { series_id: String, reason: String },

    #[error("Unknown series id '{0}'")]
    UnknownSeriesId(String),

    #[error("Invalid response for '{series_id}': {reason}")]
    InvalidResponse { series_id: String, reason: String },
}

impl FetchError {
    pub fn from_api(series_id: &str, error: ApiError) -> Self {
        match error {
            ApiError::UnknownSeriesId(id) => FetchError::UnknownSeriesId(id),
            ApiError::ProviderUnavailable(reason) | ApiError::Configuration(reason) => {
                FetchError::ProviderUnavailable {
                    series_id: series_id.to_string(),
                    reason,
                }
            }
            ApiError::Deserialization(reason) | ApiError::InvalidData(reason) => {
                FetchError::InvalidResponse {
                    series_id: series_id.to_string(),
                    reason,
                }
            }
        }
    }

    /// True when the same request may succeed later, e.g. after a timeout.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FetchError::ProviderUnavailable { .. })
    }

    pub fn series_id(&self) -> &str {
        match self {
            FetchError::ProviderUnavailable { series_id, .. }
            | FetchError::InvalidResponse { series_id, .. } => series_id,
            FetchError::UnknownSeriesId(series_id) => series_id,
        }
    }
}
