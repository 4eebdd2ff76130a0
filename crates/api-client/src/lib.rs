use crate::error::ApiError;
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::{ApiKey, ProviderConfig};
use core_types::Observation;
use url::Url;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::{ApiErrorResponse, ObservationsResponse, RawObservation};

/// The generic, abstract interface for a statistical data provider.
/// This trait is the contract that the fetcher uses, allowing the
/// underlying implementation (live or stub) to be swapped out.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetches the observations of one series between two dates, inclusive.
    ///
    /// Observations without a value are omitted. Order is whatever the
    /// provider returns; callers normalise it.
    async fn fetch_observations(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Observation>, ApiError>;
}

/// A concrete implementation of the `ApiClient` for the FRED API.
#[derive(Clone)]
pub struct FredClient {
    client: reqwest::Client,
    observations_url: Url,
    api_key: ApiKey,
}

impl FredClient {
    pub fn new(provider: &ProviderConfig, api_key: ApiKey) -> Result<Self, ApiError> {
        let observations_url = Url::parse(&format!(
            "{}/series/observations",
            provider.base_url.trim_end_matches('/')
        ))
        .map_err(|e| {
            ApiError::Configuration(format!("Invalid base URL '{}': {}", provider.base_url, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(provider.timeout)
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            observations_url,
            api_key,
        })
    }
}

#[async_trait]
impl ApiClient for FredClient {
    async fn fetch_observations(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Observation>, ApiError> {
        let observation_start = start.format("%Y-%m-%d").to_string();
        let observation_end = end.format("%Y-%m-%d").to_string();

        tracing::debug!(
            series_id,
            %observation_start,
            %observation_end,
            "Requesting observations from FRED."
        );

        let response = self
            .client
            .get(self.observations_url.clone())
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.expose()),
                ("file_type", "json"),
                ("observation_start", observation_start.as_str()),
                ("observation_end", observation_end.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            let body = serde_json::from_str::<ObservationsResponse>(&text)
                .map_err(|e| ApiError::Deserialization(e.to_string()))?;
            body.into_observations()
        } else {
            match serde_json::from_str::<ApiErrorResponse>(&text) {
                Ok(api_error) => Err(api_error.into_api_error(series_id)),
                Err(_) => Err(ApiError::ProviderUnavailable(format!(
                    "HTTP {} from FRED: {}",
                    status, text
                ))),
            }
        }
    }
}
