use crate::cache::TtlCache;
use crate::error::FetchError;
use api_client::ApiClient;
use chrono::{NaiveDate, Utc};
use core_types::{Cadence, LookbackWindow, ObservedSeries};
use std::sync::Arc;
use std::time::Duration;

/// Identifies one cached fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub provider_code: String,
    pub indicator_name: String,
    pub cadence: Cadence,
}

/// Retrieves raw series from the provider over the fetch window, memoised for
/// the configured time-to-live.
pub struct SeriesFetcher {
    client: Arc<dyn ApiClient>,
    cache: TtlCache<SeriesKey, ObservedSeries>,
    window: LookbackWindow,
}

impl SeriesFetcher {
    pub fn new(client: Arc<dyn ApiClient>, window: LookbackWindow, ttl: Duration) -> Self {
        Self {
            client,
            cache: TtlCache::new(ttl),
            window,
        }
    }

    pub fn window(&self) -> LookbackWindow {
        self.window
    }

    /// Fetches the series ending today.
    pub async fn fetch(
        &self,
        provider_code: &str,
        indicator_name: &str,
        cadence: Cadence,
    ) -> Result<ObservedSeries, FetchError> {
        self.fetch_as_of(provider_code, indicator_name, cadence, Utc::now().date_naive())
            .await
    }

    /// Fetches the series over `[today - fetch_years, today]`.
    ///
    /// A fresh cache entry for the same `(provider_code, indicator_name, cadence)`
    /// is returned without contacting the provider.
    pub async fn fetch_as_of(
        &self,
        provider_code: &str,
        indicator_name: &str,
        cadence: Cadence,
        today: NaiveDate,
    ) -> Result<ObservedSeries, FetchError> {
        let key = SeriesKey {
            provider_code: provider_code.to_string(),
            indicator_name: indicator_name.to_string(),
            cadence,
        };
        let start = self.window.fetch_start(today);

        self.cache.purge_expired().await;
        self.cache
            .get_or_try_insert_with(key, || async move {
                tracing::info!(
                    provider_code,
                    indicator_name,
                    %start,
                    end = %today,
                    "Fetching series from provider."
                );

                let observations = self
                    .client
                    .fetch_observations(provider_code, start, today)
                    .await
                    .map_err(|e| FetchError::from_api(provider_code, e))?;

                let received = observations.len();
                let series = ObservedSeries::from_unsorted(observations);
                if series.len() != received {
                    tracing::warn!(
                        provider_code,
                        dropped = received - series.len(),
                        "Dropped observations with duplicate dates."
                    );
                }

                tracing::debug!(
                    provider_code,
                    observations = series.len(),
                    first = ?series.first().map(|o| o.date),
                    last = ?series.last().map(|o| o.date),
                    "Series fetched."
                );
                Ok::<_, FetchError>(series)
            })
            .await
    }
}
