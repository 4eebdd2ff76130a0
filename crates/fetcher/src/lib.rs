//! # Series Fetcher
//!
//! Retrieves raw observations from the data provider over the lookback
//! window and memoises them in a time-bounded, process-wide cache.
//!
//! ## Public API
//!
//! - `SeriesFetcher`: fetch + normalise + cache, keyed by
//!   `(provider code, indicator name, cadence)`.
//! - `TtlCache`: the generic get-or-compute cache with expiry.
//! - `FetchError`: the per-series, recoverable failure of a fetch.

pub mod cache;
pub mod error;
pub mod series;

pub use cache::TtlCache;
pub use error::FetchError;
pub use series::{SeriesFetcher, SeriesKey};
