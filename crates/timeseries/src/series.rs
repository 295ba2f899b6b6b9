use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable series of dated decimal observations.
///
/// Points are held in ascending date order with at most one value per date,
/// which keeps date lookup a binary search. Use [`TimeSeries::builder`] to
/// assemble a series, or [`TimeSeries::of`] for a single point.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(NaiveDate, Decimal)>", into = "Vec<(NaiveDate, Decimal)>")]
pub struct TimeSeries {
    points: Vec<(NaiveDate, Decimal)>,
}

impl TimeSeries {
    /// An empty series.
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// A series containing a single observation.
    pub fn of(date: NaiveDate, value: Decimal) -> Self {
        Self {
            points: vec![(date, value)],
        }
    }

    /// Start building a series point by point.
    pub fn builder() -> TimeSeriesBuilder {
        TimeSeriesBuilder::new()
    }

    /// Value observed on the given date, if any.
    pub fn get(&self, date: NaiveDate) -> Option<Decimal> {
        self.points
            .binary_search_by_key(&date, |(d, _)| *d)
            .ok()
            .map(|idx| self.points[idx].1)
    }

    /// Earliest observation, if the series is non-empty.
    pub fn first(&self) -> Option<(NaiveDate, Decimal)> {
        self.points.first().copied()
    }

    /// Latest observation, if the series is non-empty.
    pub fn latest(&self) -> Option<(NaiveDate, Decimal)> {
        self.points.last().copied()
    }

    /// Latest observation on or before the given date.
    pub fn latest_on_or_before(&self, date: NaiveDate) -> Option<(NaiveDate, Decimal)> {
        let idx = self.points.partition_point(|(d, _)| *d <= date);
        idx.checked_sub(1).map(|i| self.points[i])
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over `(date, value)` pairs in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
        self.points.iter().copied()
    }

    /// Iterate over the dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|(d, _)| *d)
    }

    /// Iterate over the values in date order.
    pub fn values(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }
}

impl From<Vec<(NaiveDate, Decimal)>> for TimeSeries {
    /// Builds a series from unordered points; later duplicates win.
    fn from(points: Vec<(NaiveDate, Decimal)>) -> Self {
        points.into_iter().collect()
    }
}

impl From<TimeSeries> for Vec<(NaiveDate, Decimal)> {
    fn from(series: TimeSeries) -> Self {
        series.points
    }
}

impl FromIterator<(NaiveDate, Decimal)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Decimal)>>(iter: I) -> Self {
        let mut builder = TimeSeriesBuilder::new();
        for (date, value) in iter {
            builder = builder.put(date, value);
        }
        builder.build()
    }
}

/// Accumulates observations for a [`TimeSeries`].
///
/// Dates may be added in any order; a second `put` on the same date replaces
/// the earlier value.
#[derive(Clone, Debug, Default)]
pub struct TimeSeriesBuilder {
    points: BTreeMap<NaiveDate, Decimal>,
}

impl TimeSeriesBuilder {
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
        }
    }

    /// Add one observation, replacing any existing value on that date.
    pub fn put(mut self, date: NaiveDate, value: Decimal) -> Self {
        self.points.insert(date, value);
        self
    }

    /// Add every observation from the iterator.
    pub fn put_all<I: IntoIterator<Item = (NaiveDate, Decimal)>>(mut self, iter: I) -> Self {
        for (date, value) in iter {
            self.points.insert(date, value);
        }
        self
    }

    pub fn build(self) -> TimeSeries {
        TimeSeries {
            points: self.points.into_iter().collect(),
        }
    }
}
