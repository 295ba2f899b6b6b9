use std::collections::HashMap;

use chrono::NaiveDate;
use mosaic_timeseries::TimeSeries;

use super::id::{MarketDataId, ObservableId};

/// Immutable set of market data known on one valuation date.
///
/// A snapshot never changes once handed out; every update copies and
/// extends. Single values are stored under their full identifier, time
/// series under the observable identifier they belong to.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<V> {
    valuation_date: NaiveDate,
    values: HashMap<MarketDataId, V>,
    time_series: HashMap<ObservableId, TimeSeries>,
}

impl<V> Snapshot<V> {
    /// A snapshot containing no data for the given valuation date.
    pub fn empty(valuation_date: NaiveDate) -> Self {
        Self {
            valuation_date,
            values: HashMap::new(),
            time_series: HashMap::new(),
        }
    }

    /// This snapshot extended with one value, replacing any existing entry.
    pub fn with_value(mut self, id: impl Into<MarketDataId>, value: V) -> Self {
        self.values.insert(id.into(), value);
        self
    }

    /// This snapshot extended with one time series, replacing any existing
    /// entry.
    pub fn with_time_series(mut self, id: ObservableId, series: TimeSeries) -> Self {
        self.time_series.insert(id, series);
        self
    }

    pub fn valuation_date(&self) -> NaiveDate {
        self.valuation_date
    }

    pub fn value(&self, id: &MarketDataId) -> Option<&V> {
        self.values.get(id)
    }

    pub fn time_series(&self, id: &ObservableId) -> Option<&TimeSeries> {
        self.time_series.get(id)
    }

    pub fn contains_value(&self, id: &MarketDataId) -> bool {
        self.values.contains_key(id)
    }

    pub fn contains_time_series(&self, id: &ObservableId) -> bool {
        self.time_series.contains_key(id)
    }

    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    pub fn time_series_count(&self) -> usize {
        self.time_series.len()
    }

    /// Extend with one round of resolved data. Identifiers already present
    /// keep their existing entry.
    pub(crate) fn extend_new_entries(
        &mut self,
        values: impl IntoIterator<Item = (MarketDataId, V)>,
        series: impl IntoIterator<Item = (ObservableId, TimeSeries)>,
    ) {
        for (id, value) in values {
            self.values.entry(id).or_insert(value);
        }
        for (id, ts) in series {
            self.time_series.entry(id).or_insert(ts);
        }
    }
}
