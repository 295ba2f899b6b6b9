//! Property-based integration tests for market data resolution.
//!
//! These tests verify that universal properties of the engine hold across
//! randomly generated requirement sets and source contents, using the
//! `proptest` crate for test case generation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use mosaic_market_data::{
    DataKind, DerivedId, IdentityTranslator, MarketDataBuilder, MarketDataEngine, MarketDataError,
    MarketDataId, ObservableId, ObservableSource, Requirements, Snapshot, StandardId,
    TimeSeriesSource,
};
use mosaic_timeseries::TimeSeries;

// =============================================================================
// Test doubles
// =============================================================================

/// Observable source backed by a fixed map; unknown identifiers are left
/// out of the response.
struct MapObservableSource {
    values: HashMap<ObservableId, Decimal>,
}

#[async_trait]
impl ObservableSource for MapObservableSource {
    async fn fetch(
        &self,
        ids: HashSet<ObservableId>,
    ) -> HashMap<ObservableId, Result<Decimal, MarketDataError>> {
        ids.into_iter()
            .filter_map(|id| self.values.get(&id).map(|value| (id, Ok(*value))))
            .collect()
    }
}

/// Time series source backed by a fixed map.
struct MapTimeSeriesSource {
    series: HashMap<ObservableId, TimeSeries>,
}

#[async_trait]
impl TimeSeriesSource for MapTimeSeriesSource {
    async fn time_series(&self, id: &ObservableId) -> Result<TimeSeries, MarketDataError> {
        self.series
            .get(id)
            .cloned()
            .ok_or_else(|| MarketDataError::NoTimeSeries(id.clone()))
    }
}

/// `double:test/x` is twice the value of `test/x`.
struct DoubleBuilder;

impl MarketDataBuilder<Decimal> for DoubleBuilder {
    fn kind(&self) -> DataKind {
        DataKind::new("double")
    }

    fn requirements(&self, id: &DerivedId) -> Requirements {
        Requirements::empty().add_values([ObservableId::of(id.key().clone())])
    }

    fn build(&self, id: &DerivedId, data: &Snapshot<Decimal>) -> Result<Decimal, MarketDataError> {
        let dep = MarketDataId::from(ObservableId::of(id.key().clone()));
        let value = data
            .value(&dep)
            .ok_or_else(|| MarketDataError::MissingDependency(dep.clone()))?;
        Ok(*value * Decimal::TWO)
    }
}

fn build_engine(
    values: &HashMap<ObservableId, Decimal>,
    series: &HashMap<ObservableId, TimeSeries>,
) -> MarketDataEngine<Decimal> {
    MarketDataEngine::new(
        Arc::new(MapTimeSeriesSource {
            series: series.clone(),
        }),
        Arc::new(MapObservableSource {
            values: values.clone(),
        }),
        Arc::new(IdentityTranslator),
        vec![Arc::new(DoubleBuilder)],
    )
    .unwrap()
}

fn empty_snapshot() -> Snapshot<Decimal> {
    Snapshot::empty(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
}

// =============================================================================
// Generators
// =============================================================================

/// Generates an observable identifier from a small shared universe, so
/// generated requirements and source contents overlap.
fn arb_observable() -> impl Strategy<Value = ObservableId> {
    (0u8..8).prop_map(|n| ObservableId::of(StandardId::new("test", n.to_string())))
}

/// Generates an identifier of any kind: observable, buildable derived, or
/// derived with no registered builder.
fn arb_market_data_id() -> impl Strategy<Value = MarketDataId> {
    prop_oneof![
        arb_observable().prop_map(MarketDataId::from),
        (0u8..8).prop_map(|n| {
            MarketDataId::from(DerivedId::new(
                DataKind::new("double"),
                StandardId::new("test", n.to_string()),
            ))
        }),
        (0u8..8).prop_map(|n| {
            MarketDataId::from(DerivedId::new(
                DataKind::new("mystery"),
                StandardId::new("test", n.to_string()),
            ))
        }),
    ]
}

/// Generates an arbitrary requirement set over the shared universe.
fn arb_requirements() -> impl Strategy<Value = Requirements> {
    (
        proptest::collection::vec(arb_market_data_id(), 0..12),
        proptest::collection::vec(arb_observable(), 0..6),
    )
        .prop_map(|(values, series)| {
            Requirements::empty()
                .add_values(values)
                .add_time_series(series)
        })
}

/// Generates the values the observable source knows about.
fn arb_known_values() -> impl Strategy<Value = HashMap<ObservableId, Decimal>> {
    proptest::collection::hash_map(arb_observable(), (1u32..1000).prop_map(Decimal::from), 0..8)
}

/// Generates the histories the time series source knows about.
fn arb_known_series() -> impl Strategy<Value = HashMap<ObservableId, TimeSeries>> {
    proptest::collection::hash_map(
        arb_observable(),
        (1u32..1000).prop_map(|n| {
            TimeSeries::of(
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                Decimal::from(n),
            )
        }),
        0..8,
    )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Feature: market-data-engine, Property 1: Every requested identifier resolves or fails**
    ///
    /// Whatever the sources know, every identifier in the requirements ends
    /// up in exactly one place: the snapshot or the matching failure map.
    #[test]
    fn prop_every_requirement_resolves_or_fails(
        requirements in arb_requirements(),
        known_values in arb_known_values(),
        known_series in arb_known_series(),
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let engine = build_engine(&known_values, &known_series);
        let result = runtime.block_on(engine.resolve(requirements.clone(), empty_snapshot()));

        for id in requirements.values() {
            let resolved = result.snapshot().contains_value(id);
            let failed = result.single_value_failures().contains_key(id);
            prop_assert!(
                resolved ^ failed,
                "{} must be resolved or failed exactly once (resolved: {}, failed: {})",
                id,
                resolved,
                failed
            );
        }
        for id in requirements.time_series() {
            let resolved = result.snapshot().contains_time_series(id);
            let failed = result.time_series_failures().contains_key(id);
            prop_assert!(
                resolved ^ failed,
                "time series {} must be resolved or failed exactly once",
                id
            );
        }
    }

    /// **Feature: market-data-engine, Property 2: Resolution is deterministic**
    ///
    /// Two runs over the same requirements and sources produce identical
    /// snapshots, identical failures, and identical diagnostics.
    #[test]
    fn prop_resolution_is_deterministic(
        requirements in arb_requirements(),
        known_values in arb_known_values(),
        known_series in arb_known_series(),
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let engine = build_engine(&known_values, &known_series);

        let first = runtime.block_on(engine.resolve(requirements.clone(), empty_snapshot()));
        let second = runtime.block_on(engine.resolve(requirements, empty_snapshot()));

        prop_assert_eq!(first.snapshot(), second.snapshot());
        prop_assert_eq!(first.single_value_failures(), second.single_value_failures());
        prop_assert_eq!(first.time_series_failures(), second.time_series_failures());
        prop_assert_eq!(first.diagnostics(), second.diagnostics());
    }

    /// **Feature: market-data-engine, Property 3: Resolving on top of the result adds nothing**
    ///
    /// Feeding a run's snapshot back in as the base changes no resolved
    /// value and reproduces exactly the failures that remain.
    #[test]
    fn prop_resolution_is_idempotent(
        requirements in arb_requirements(),
        known_values in arb_known_values(),
        known_series in arb_known_series(),
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let engine = build_engine(&known_values, &known_series);

        let first = runtime.block_on(engine.resolve(requirements.clone(), empty_snapshot()));
        let second = runtime.block_on(engine.resolve(requirements, first.snapshot().clone()));

        prop_assert_eq!(first.snapshot(), second.snapshot());
        prop_assert_eq!(first.single_value_failures(), second.single_value_failures());
        prop_assert_eq!(first.time_series_failures(), second.time_series_failures());
    }

    /// **Feature: market-data-engine, Property 4: Rounds are bounded by the work done**
    ///
    /// Every round except the last makes progress, so the round count can
    /// never exceed the number of identifiers handled plus one.
    #[test]
    fn prop_rounds_are_bounded(
        requirements in arb_requirements(),
        known_values in arb_known_values(),
        known_series in arb_known_series(),
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let engine = build_engine(&known_values, &known_series);
        let result = runtime.block_on(engine.resolve(requirements.clone(), empty_snapshot()));

        let diagnostics = result.diagnostics();
        let bound = requirements.values().len()
            + requirements.time_series().len()
            + 2 * diagnostics.requirements_discovered
            + 1;
        prop_assert!(
            (diagnostics.rounds as usize) <= bound,
            "{} rounds exceeds bound {}",
            diagnostics.rounds,
            bound
        );
    }
}
