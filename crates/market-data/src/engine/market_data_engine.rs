//! The resolution engine.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::builder::{BuilderRegistry, MarketDataBuilder};
use crate::errors::{DuplicateBuilderError, MarketDataError};
use crate::models::{
    DerivedId, MarketDataFeed, MarketDataId, MarketDataKey, MarketDataResult, ObservableId,
    Requirements, Snapshot,
};
use crate::source::{FeedTranslator, ObservableSource, TimeSeriesSource};

use super::boundary;
use super::run::{DependencyStatus, RunState};

/// Resolves market data requirements against sources and builders.
///
/// The engine itself is immutable: construct it once with the sources,
/// the feed translator and the builders, share it behind an [`Arc`], and
/// call [`resolve`](Self::resolve) per valuation run. Each call owns its
/// own state, so concurrent runs never interfere.
///
/// Resolution proceeds in rounds. A round classifies the pending
/// identifiers, fetches every observable in one batched source call,
/// looks up pending time series, and runs the builders whose
/// prerequisites were already resolved when the round started. Data
/// resolved during a round becomes visible at its end, so builders only
/// ever read a consistent round-start view. The loop stops when nothing
/// is pending or when a full round makes no progress; anything still
/// pending at that point is recorded as a failure rather than looping
/// forever.
pub struct MarketDataEngine<V> {
    time_series_source: Arc<dyn TimeSeriesSource>,
    observable_source: Arc<dyn ObservableSource>,
    feed_translator: Arc<dyn FeedTranslator>,
    builders: BuilderRegistry<V>,
}

impl<V> MarketDataEngine<V>
where
    V: From<Decimal> + Send + Sync,
{
    /// Create an engine, registering one builder per data kind.
    pub fn new(
        time_series_source: Arc<dyn TimeSeriesSource>,
        observable_source: Arc<dyn ObservableSource>,
        feed_translator: Arc<dyn FeedTranslator>,
        builders: Vec<Arc<dyn MarketDataBuilder<V>>>,
    ) -> Result<Self, DuplicateBuilderError> {
        Ok(Self::with_registry(
            time_series_source,
            observable_source,
            feed_translator,
            BuilderRegistry::new(builders)?,
        ))
    }

    /// Create an engine from an already assembled registry.
    pub fn with_registry(
        time_series_source: Arc<dyn TimeSeriesSource>,
        observable_source: Arc<dyn ObservableSource>,
        feed_translator: Arc<dyn FeedTranslator>,
        builders: BuilderRegistry<V>,
    ) -> Self {
        Self {
            time_series_source,
            observable_source,
            feed_translator,
            builders,
        }
    }

    /// Resolve `requirements` on top of the `base` snapshot.
    ///
    /// Requirements already satisfied by `base` are not fetched again.
    /// The call never fails as a whole: every identifier that cannot be
    /// resolved is recorded in the result with the error that stopped it,
    /// and everything else resolves normally.
    pub async fn resolve(
        &self,
        requirements: Requirements,
        base: Snapshot<V>,
    ) -> MarketDataResult<V> {
        let mut state = RunState::new(requirements, base);
        let (values, series) = state.pending_counts();
        debug!("Resolving {} value(s) and {} time series", values, series);

        loop {
            if state.nothing_pending() {
                break;
            }
            state.begin_round();

            let (batch, derived) = self.classify(&mut state);
            self.fetch_observables(&mut state, batch).await;
            self.fetch_time_series(&mut state).await;
            self.build_derived(&mut state, derived);

            if !state.end_round() {
                let (pending_values, pending_series) = state.pending_counts();
                warn!(
                    "No progress in round {}; {} identifier(s) cannot be resolved",
                    state.round(),
                    pending_values + pending_series
                );
                state.fail_remaining_unresolved();
                break;
            }
        }

        let result = state.into_result();
        let diagnostics = result.diagnostics();
        info!(
            "Resolution finished after {} round(s): {} value(s) and {} time series resolved, {} failure(s)",
            diagnostics.rounds,
            diagnostics.values_resolved,
            diagnostics.time_series_resolved,
            result.single_value_failures().len() + result.time_series_failures().len()
        );
        result
    }

    /// Sort this round's single values into the observable batch, the
    /// derived work list, and immediate failures.
    fn classify(
        &self,
        state: &mut RunState<V>,
    ) -> (Vec<(ObservableId, ObservableId)>, Vec<DerivedId>) {
        let mut batch = Vec::new();
        let mut derived = Vec::new();

        for id in state.take_pending_values() {
            match &id {
                MarketDataId::Observable(observable) => {
                    if *observable.feed() == MarketDataFeed::NO_RULE {
                        let error = MarketDataError::NoMatchingRule(MarketDataKey::new(
                            observable.to_string(),
                        ));
                        state.fail_value_now(id, error);
                        continue;
                    }
                    match boundary::catch_sync(|| self.feed_translator.id_for_feed(observable)) {
                        Ok(Some(feed_id)) => batch.push((observable.clone(), feed_id)),
                        Ok(None) => {
                            let error = MarketDataError::MissingMapping(MarketDataKey::new(
                                observable.to_string(),
                            ));
                            state.fail_value_now(id, error);
                        }
                        Err(message) => {
                            let error = MarketDataError::SourceFailure {
                                id: observable.to_string(),
                                message,
                            };
                            state.fail_value_now(id, error);
                        }
                    }
                }
                MarketDataId::Derived(derived_id) => {
                    if self.builders.contains(derived_id.kind()) {
                        derived.push(derived_id.clone());
                    } else {
                        let error = MarketDataError::MissingBuilder(id.clone());
                        state.fail_value_now(id, error);
                    }
                }
                MarketDataId::MissingMapping(key) => {
                    let error = MarketDataError::MissingMapping(key.clone());
                    state.fail_value_now(id, error);
                }
                MarketDataId::NoMatchingRule(key) => {
                    let error = MarketDataError::NoMatchingRule(key.clone());
                    state.fail_value_now(id, error);
                }
            }
        }

        (batch, derived)
    }

    /// One batched source call for every translated identifier. Results
    /// come back keyed by feed identifier and are recorded under the
    /// identifier originally requested.
    async fn fetch_observables(
        &self,
        state: &mut RunState<V>,
        batch: Vec<(ObservableId, ObservableId)>,
    ) {
        if batch.is_empty() {
            return;
        }
        let feed_ids: HashSet<ObservableId> = batch
            .iter()
            .map(|(_, feed_id)| feed_id.clone())
            .collect();
        debug!(
            "Round {}: fetching {} observable(s)",
            state.round(),
            feed_ids.len()
        );

        match boundary::catch_async(self.observable_source.fetch(feed_ids)).await {
            Ok(results) => {
                for (original, feed_id) in batch {
                    match results.get(&feed_id) {
                        Some(Ok(value)) => {
                            state.stage_value(MarketDataId::Observable(original), V::from(*value));
                        }
                        Some(Err(error)) => {
                            state.fail_value_now(MarketDataId::Observable(original), error.clone());
                        }
                        None => {
                            let error = MarketDataError::NoObservableData(original.clone());
                            state.fail_value_now(MarketDataId::Observable(original), error);
                        }
                    }
                }
            }
            Err(message) => {
                warn!("Observable source panicked: {}", message);
                for (original, _) in batch {
                    let error = MarketDataError::SourceFailure {
                        id: original.to_string(),
                        message: message.clone(),
                    };
                    state.fail_value_now(MarketDataId::Observable(original), error);
                }
            }
        }
    }

    /// Look up each pending time series directly at its source.
    async fn fetch_time_series(&self, state: &mut RunState<V>) {
        for id in state.take_pending_time_series() {
            if *id.feed() == MarketDataFeed::NO_RULE {
                let error = MarketDataError::NoMatchingRule(MarketDataKey::new(id.to_string()));
                state.fail_time_series_now(id, error);
                continue;
            }
            match boundary::catch_async(self.time_series_source.time_series(&id)).await {
                Ok(Ok(series)) => state.stage_series(id, series),
                Ok(Err(error)) => state.fail_time_series_now(id, error),
                Err(message) => {
                    let error = MarketDataError::SourceFailure {
                        id: id.to_string(),
                        message,
                    };
                    state.fail_time_series_now(id, error);
                }
            }
        }
    }

    /// Run builders whose prerequisites resolved in earlier rounds.
    ///
    /// Output is staged until the round ends, so a value built here is
    /// not visible to other builders in the same round and the outcome
    /// never depends on the order the identifiers are visited in.
    fn build_derived(&self, state: &mut RunState<V>, derived: Vec<DerivedId>) {
        for id in derived {
            let Some(builder) = self.builders.get(id.kind()) else {
                let error = MarketDataError::MissingBuilder(MarketDataId::Derived(id.clone()));
                state.stage_failure(MarketDataId::Derived(id), error);
                continue;
            };

            let requirements = match state.cached_requirements(&id) {
                Some(requirements) => requirements,
                None => match boundary::catch_sync(|| builder.requirements(&id)) {
                    Ok(requirements) => {
                        let discovered = state.discover(&requirements);
                        if discovered > 0 {
                            debug!(
                                "Round {}: {} declared {} new requirement(s)",
                                state.round(),
                                id,
                                discovered
                            );
                        }
                        state.cache_requirements(id.clone(), requirements.clone());
                        requirements
                    }
                    Err(message) => {
                        warn!("Requirements lookup for {} panicked: {}", id, message);
                        let error = MarketDataError::SourceFailure {
                            id: id.to_string(),
                            message,
                        };
                        state.stage_failure(MarketDataId::Derived(id), error);
                        continue;
                    }
                },
            };

            match state.dependency_status(&requirements) {
                DependencyStatus::AllResolved => {
                    match boundary::catch_sync(|| builder.build(&id, state.snapshot())) {
                        Ok(Ok(value)) => state.stage_value(MarketDataId::Derived(id), value),
                        Ok(Err(error)) => state.stage_failure(MarketDataId::Derived(id), error),
                        Err(message) => {
                            warn!("Builder for {} panicked: {}", id, message);
                            let error = MarketDataError::SourceFailure {
                                id: id.to_string(),
                                message,
                            };
                            state.stage_failure(MarketDataId::Derived(id), error);
                        }
                    }
                }
                DependencyStatus::FailedDependency(dependency) => {
                    let error = MarketDataError::MissingDependency(dependency);
                    state.stage_failure(MarketDataId::Derived(id), error);
                }
                DependencyStatus::Waiting => state.keep_pending(MarketDataId::Derived(id)),
            }
        }
    }
}
