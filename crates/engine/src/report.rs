use core_types::{ComparisonTable, DerivedSeries, Indicator};
use fetcher::FetchError;
use serde::Serialize;

/// Why a series produced nothing to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDataReason {
    ProviderUnavailable,
    UnknownSeriesId,
    InvalidResponse,
    /// The provider answered with no observations in the fetch window.
    NoObservations,
    /// Too few observations for a year-over-year change inside the window.
    InsufficientHistory,
}

impl From<&FetchError> for NoDataReason {
    fn from(e: &FetchError) -> Self {
        match e {
            FetchError::ProviderUnavailable { .. } => NoDataReason::ProviderUnavailable,
            FetchError::UnknownSeriesId(_) => NoDataReason::UnknownSeriesId,
            FetchError::InvalidResponse { .. } => NoDataReason::InvalidResponse,
        }
    }
}

/// A user-facing "no data" message for one economy and indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub economy_label: String,
    pub indicator: Indicator,
    pub provider_code: String,
    pub reason: NoDataReason,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "content", rename_all = "snake_case")]
pub enum SeriesOutcome {
    Data(DerivedSeries),
    NoData(Notice),
}

impl SeriesOutcome {
    pub fn series(&self) -> Option<&DerivedSeries> {
        match self {
            SeriesOutcome::Data(series) => Some(series),
            SeriesOutcome::NoData(_) => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            SeriesOutcome::Data(_) => None,
            SeriesOutcome::NoData(notice) => Some(notice),
        }
    }
}

/// One indicator of one economy: raw values with their YoY change, or a notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorPanel {
    pub economy_label: String,
    pub indicator: Indicator,
    pub provider_code: String,
    pub outcome: SeriesOutcome,
}

/// The single-economy view: every indicator in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EconomyReport {
    pub economy_id: String,
    pub economy_label: String,
    pub panels: Vec<IndicatorPanel>,
}

/// The multi-economy view of one indicator's raw values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub indicator: Indicator,
    pub table: ComparisonTable,
    /// One entry per economy that contributed no data.
    pub notices: Vec<Notice>,
}

impl ComparisonReport {
    /// True when no selected economy produced any value.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
