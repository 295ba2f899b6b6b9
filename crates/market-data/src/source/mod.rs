//! Market data source abstractions.
//!
//! This module contains:
//! - The `ObservableSource` and `TimeSeriesSource` traits the engine fetches through
//! - The `FeedTranslator` trait that rewrites identifiers per feed
//! - No-op implementations for engines that only build from supplied data
//!
//! Sources are feed-agnostic from the engine's point of view: requirements
//! are translated into feed vocabulary before a source ever sees them, and
//! results are keyed back under the identifiers callers asked for.

mod noop;
mod traits;

// Re-exports
pub use noop::{EmptyObservableSource, EmptyTimeSeriesSource, IdentityTranslator};
pub use traits::{FeedTranslator, ObservableSource, TimeSeriesSource};
