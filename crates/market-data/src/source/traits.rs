//! Source trait definitions for externally observed market data.
//!
//! Sources are the engine's only gateway to the outside world: one trait
//! for current observable values, one for historical series, and a
//! synchronous translator that rewrites identifiers into the vocabulary of
//! the feed they are observed on.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use mosaic_timeseries::TimeSeries;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::ObservableId;

/// Source of historical time series.
///
/// Implement this trait to supply history for observable identifiers. The
/// engine calls it once per requested identifier per run.
#[async_trait]
pub trait TimeSeriesSource: Send + Sync {
    /// Fetch the full known history for one identifier.
    ///
    /// # Returns
    ///
    /// The series on success, or a `MarketDataError` explaining why there
    /// is none.
    async fn time_series(&self, id: &ObservableId) -> Result<TimeSeries, MarketDataError>;
}

/// Source of current observable values.
///
/// The engine batches: all observable identifiers that become ready in a
/// resolution round are fetched in a single call, so implementations can
/// issue one upstream request per round.
#[async_trait]
pub trait ObservableSource: Send + Sync {
    /// Fetch current values for a batch of identifiers.
    ///
    /// The identifiers have already been translated into this source's feed
    /// vocabulary. Each identifier may succeed or fail independently;
    /// identifiers absent from the returned map count as missing data.
    async fn fetch(
        &self,
        ids: HashSet<ObservableId>,
    ) -> HashMap<ObservableId, Result<Decimal, MarketDataError>>;
}

/// Rewrites observable identifiers into the vocabulary of their feed.
///
/// Requirements arrive keyed the way callers know the data; feeds publish
/// under their own symbology. The translator bridges the two.
///
/// Returning `None` means no mapping exists, and the identifier fails with
/// a missing-mapping error without ever reaching the observable source.
pub trait FeedTranslator: Send + Sync {
    fn id_for_feed(&self, id: &ObservableId) -> Option<ObservableId>;
}
