//! Do-nothing source implementations.
//!
//! Used when an engine only builds derived data from supplied values: every
//! fetch reports missing data and translation leaves identifiers unchanged.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use mosaic_timeseries::TimeSeries;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::ObservableId;

use super::traits::{FeedTranslator, ObservableSource, TimeSeriesSource};

/// Observable source with no data: every identifier in the batch fails as
/// missing.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyObservableSource;

#[async_trait]
impl ObservableSource for EmptyObservableSource {
    async fn fetch(
        &self,
        ids: HashSet<ObservableId>,
    ) -> HashMap<ObservableId, Result<Decimal, MarketDataError>> {
        ids.into_iter()
            .map(|id| {
                let error = MarketDataError::NoObservableData(id.clone());
                (id, Err(error))
            })
            .collect()
    }
}

/// Time series source with no history: every request fails with no-series.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyTimeSeriesSource;

#[async_trait]
impl TimeSeriesSource for EmptyTimeSeriesSource {
    async fn time_series(&self, id: &ObservableId) -> Result<TimeSeries, MarketDataError> {
        Err(MarketDataError::NoTimeSeries(id.clone()))
    }
}

/// Translator that maps every identifier to itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityTranslator;

impl FeedTranslator for IdentityTranslator {
    fn id_for_feed(&self, id: &ObservableId) -> Option<ObservableId> {
        Some(id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StandardId;

    fn obs(value: &str) -> ObservableId {
        ObservableId::of(StandardId::new("vendor", value))
    }

    #[tokio::test]
    async fn test_empty_observable_source_fails_every_id() {
        let results = EmptyObservableSource
            .fetch(HashSet::from([obs("1"), obs("2")]))
            .await;
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[&obs("1")],
            Err(MarketDataError::NoObservableData(obs("1")))
        );
    }

    #[tokio::test]
    async fn test_empty_time_series_source_fails() {
        let result = EmptyTimeSeriesSource.time_series(&obs("1")).await;
        assert_eq!(result, Err(MarketDataError::NoTimeSeries(obs("1"))));
    }

    #[test]
    fn test_identity_translator_returns_input() {
        let id = obs("1");
        assert_eq!(IdentityTranslator.id_for_feed(&id), Some(id));
    }
}
