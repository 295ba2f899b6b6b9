use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::id::{MarketDataId, ObservableId};

/// The market data something needs before it can be built or calculated.
///
/// Single values and historical time series are requested independently;
/// the same identifier may legitimately appear in both sets. Adding an
/// identifier twice is a no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    values: HashSet<MarketDataId>,
    time_series: HashSet<ObservableId>,
}

impl Requirements {
    /// Requirements for nothing at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add identifiers whose current values are needed.
    pub fn add_values<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<MarketDataId>,
    {
        self.values.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Add identifiers whose historical time series are needed.
    pub fn add_time_series<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = ObservableId>,
    {
        self.time_series.extend(ids);
        self
    }

    /// Union with another requirement set.
    pub fn merge(mut self, other: Requirements) -> Self {
        self.values.extend(other.values);
        self.time_series.extend(other.time_series);
        self
    }

    pub fn values(&self) -> &HashSet<MarketDataId> {
        &self.values
    }

    pub fn time_series(&self) -> &HashSet<ObservableId> {
        &self.time_series
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.time_series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::{DataKind, StandardId};
    use crate::models::DerivedId;

    fn obs(value: &str) -> ObservableId {
        ObservableId::of(StandardId::new("vendor", value))
    }

    #[test]
    fn test_empty_requirements() {
        let reqs = Requirements::empty();
        assert!(reqs.is_empty());
        assert!(reqs.values().is_empty());
        assert!(reqs.time_series().is_empty());
    }

    #[test]
    fn test_duplicates_deduplicate() {
        let reqs = Requirements::empty()
            .add_values([obs("1"), obs("1")])
            .add_values([obs("1")]);
        assert_eq!(reqs.values().len(), 1);
    }

    #[test]
    fn test_value_and_time_series_sets_are_independent() {
        let reqs = Requirements::empty()
            .add_values([obs("1")])
            .add_time_series([obs("1")]);
        assert_eq!(reqs.values().len(), 1);
        assert_eq!(reqs.time_series().len(), 1);
        assert!(!reqs.is_empty());
    }

    #[test]
    fn test_accepts_any_identifier_kind() {
        let derived = DerivedId::new(DataKind::new("Curve"), StandardId::new("curves", "USD"));
        let reqs = Requirements::empty().add_values([MarketDataId::from(derived)]);
        assert_eq!(reqs.values().len(), 1);
    }

    #[test]
    fn test_merge_unions_both_sets() {
        let left = Requirements::empty()
            .add_values([obs("1")])
            .add_time_series([obs("2")]);
        let right = Requirements::empty()
            .add_values([obs("1"), obs("3")])
            .add_time_series([obs("4")]);
        let merged = left.merge(right);
        assert_eq!(merged.values().len(), 2);
        assert_eq!(merged.time_series().len(), 2);
    }
}
