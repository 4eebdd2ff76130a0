//! # Indicator Analytics
//!
//! Derived metrics over fetched series.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no knowledge of the provider or the cache. It depends
//!   only on `core-types`.
//! - **Stateless calculation:** `YoyCalculator` and `align` take series in and
//!   hand new values back, which keeps them easy to test.
//!
//! ## Public API
//!
//! - `YoyCalculator`: year-over-year percentage change at the series' cadence,
//!   trimmed to the presentation window.
//! - `align`: full outer join of per-economy series into a `ComparisonTable`.

// Declare the modules that constitute this crate.
pub mod aligner;
pub mod yoy;

// Re-export the key components to create a clean, public-facing API.
pub use aligner::align;
pub use yoy::YoyCalculator;
