//! # Dashboard Engine
//!
//! The request boundary between the pipeline and the presentation layer.
//! Each request runs fetch → derive → (align) sequentially and converts
//! per-series failures into "no data" notices, so one broken feed never
//! aborts a report or a comparison.

use analytics::{align, YoyCalculator};
use chrono::{NaiveDate, Utc};
use configuration::{EconomySeriesConfig, SeriesRegistry};
use core_types::{Indicator, ObservedSeries};
use fetcher::SeriesFetcher;
use std::sync::Arc;

pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use error::EngineError;
pub use report::{
    ComparisonReport, EconomyReport, IndicatorPanel, NoDataReason, Notice, SeriesOutcome,
};

/// Notified before each provider request so a front end can show progress.
pub trait ProgressListener: Send + Sync {
    fn fetching(&self, economy_label: &str, indicator: Indicator);
}

/// The central orchestrator for dashboard requests.
pub struct Dashboard {
    registry: Arc<SeriesRegistry>,
    fetcher: SeriesFetcher,
    calculator: YoyCalculator,
    progress: Option<Arc<dyn ProgressListener>>,
}

impl Dashboard {
    /// The calculator shares the fetcher's lookback window, so the fetch
    /// always reaches far enough back for the earliest displayed change.
    pub fn new(registry: Arc<SeriesRegistry>, fetcher: SeriesFetcher) -> Self {
        let calculator = YoyCalculator::new(fetcher.window());
        Self {
            registry,
            fetcher,
            calculator,
            progress: None,
        }
    }

    pub fn with_progress(mut self, listener: Arc<dyn ProgressListener>) -> Self {
        self.progress = Some(listener);
        self
    }

    pub fn registry(&self) -> &SeriesRegistry {
        &self.registry
    }

    pub async fn indicator_panel(
        &self,
        economy_id: &str,
        indicator: Indicator,
    ) -> Result<IndicatorPanel, EngineError> {
        self.indicator_panel_as_of(economy_id, indicator, today())
            .await
    }

    pub async fn indicator_panel_as_of(
        &self,
        economy_id: &str,
        indicator: Indicator,
        today: NaiveDate,
    ) -> Result<IndicatorPanel, EngineError> {
        let economy = self.registry.get(economy_id)?;
        Ok(self.panel(economy, indicator, today).await)
    }

    /// Single-economy deep dive: all four indicators with raw values and YoY change.
    pub async fn economy_report(&self, economy_id: &str) -> Result<EconomyReport, EngineError> {
        self.economy_report_as_of(economy_id, today()).await
    }

    pub async fn economy_report_as_of(
        &self,
        economy_id: &str,
        today: NaiveDate,
    ) -> Result<EconomyReport, EngineError> {
        let economy = self.registry.get(economy_id)?;

        let mut panels = Vec::with_capacity(Indicator::ALL.len());
        for indicator in Indicator::ALL {
            panels.push(self.panel(economy, indicator, today).await);
        }

        Ok(EconomyReport {
            economy_id: economy.id.clone(),
            economy_label: economy.label.clone(),
            panels,
        })
    }

    /// Compares the raw values of one indicator across economies.
    ///
    /// Every id is resolved before anything is fetched, so an unknown economy
    /// fails the request up front. Repeated ids are fetched once.
    pub async fn compare(
        &self,
        economy_ids: &[&str],
        indicator: Indicator,
    ) -> Result<ComparisonReport, EngineError> {
        self.compare_as_of(economy_ids, indicator, today()).await
    }

    pub async fn compare_as_of(
        &self,
        economy_ids: &[&str],
        indicator: Indicator,
        today: NaiveDate,
    ) -> Result<ComparisonReport, EngineError> {
        if economy_ids.is_empty() {
            return Err(EngineError::NoEconomiesSelected);
        }

        let mut economies: Vec<&EconomySeriesConfig> = Vec::with_capacity(economy_ids.len());
        for id in economy_ids {
            let economy = self.registry.get(id)?;
            if !economies.iter().any(|e| e.id == economy.id) {
                economies.push(economy);
            }
        }

        let mut columns: Vec<(String, ObservedSeries)> = Vec::with_capacity(economies.len());
        let mut notices = Vec::new();
        for economy in economies {
            let values = match self.outcome(economy, indicator, today).await {
                SeriesOutcome::Data(series) => series.values(),
                SeriesOutcome::NoData(notice) => {
                    notices.push(notice);
                    ObservedSeries::empty()
                }
            };
            columns.push((economy.label.clone(), values));
        }

        let table = align(indicator.name(), &columns);
        if table.is_empty() {
            tracing::warn!(%indicator, "No data available for any selected economy.");
        }

        Ok(ComparisonReport {
            indicator,
            table,
            notices,
        })
    }

    async fn panel(
        &self,
        economy: &EconomySeriesConfig,
        indicator: Indicator,
        today: NaiveDate,
    ) -> IndicatorPanel {
        IndicatorPanel {
            economy_label: economy.label.clone(),
            indicator,
            provider_code: economy.provider_code(indicator).to_string(),
            outcome: self.outcome(economy, indicator, today).await,
        }
    }

    /// Fetches and derives one series. Never fails: problems become a notice.
    async fn outcome(
        &self,
        economy: &EconomySeriesConfig,
        indicator: Indicator,
        today: NaiveDate,
    ) -> SeriesOutcome {
        let provider_code = economy.provider_code(indicator);
        let cadence = economy.cadence(indicator);
        let notice = |reason: NoDataReason, message: String| {
            SeriesOutcome::NoData(Notice {
                economy_label: economy.label.clone(),
                indicator,
                provider_code: provider_code.to_string(),
                reason,
                message,
            })
        };

        if let Some(progress) = &self.progress {
            progress.fetching(&economy.label, indicator);
        }

        let series = match self
            .fetcher
            .fetch_as_of(provider_code, indicator.name(), cadence, today)
            .await
        {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    recoverable = e.is_recoverable(),
                    economy = %economy.label,
                    %indicator,
                    series_id = e.series_id(),
                    "Fetch failed; reporting no data."
                );
                return notice(
                    NoDataReason::from(&e),
                    format!(
                        "Could not retrieve data for {} for {}: {}",
                        indicator, economy.label, e
                    ),
                );
            }
        };

        if series.is_empty() {
            return notice(
                NoDataReason::NoObservations,
                format!(
                    "No observations for {} for {} ({}).",
                    indicator, economy.label, provider_code
                ),
            );
        }

        let derived = self
            .calculator
            .derive_as_of(&series, indicator.name(), cadence, today);
        if derived.is_empty() {
            return notice(
                NoDataReason::InsufficientHistory,
                format!(
                    "Not enough data to compute the year-over-year change of {} for {}.",
                    indicator, economy.label
                ),
            );
        }

        SeriesOutcome::Data(derived)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
