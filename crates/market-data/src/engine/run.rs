//! Mutable bookkeeping for one resolution run.

use std::collections::{HashMap, HashSet};

use mosaic_timeseries::TimeSeries;

use crate::errors::MarketDataError;
use crate::models::{
    DerivedId, MarketDataId, MarketDataResult, ObservableId, Requirements, ResolutionDiagnostics,
    Snapshot,
};

/// How a derived identifier's prerequisites stand at the start of a round.
pub(super) enum DependencyStatus {
    /// Everything declared is resolved; the builder can run.
    AllResolved,
    /// A prerequisite already failed. Carries the display-wise smallest
    /// failed prerequisite so the propagated error is deterministic.
    FailedDependency(MarketDataId),
    /// Prerequisites still pending; retry in a later round.
    Waiting,
}

/// State owned by one `resolve` call.
///
/// Resolved data merges into the snapshot only when a round ends, so
/// mid-round reads always see the round-start view. Failures from the
/// source paths apply immediately; failures from the derived path are
/// staged alongside built values, so a round's outcome cannot depend on
/// the order derived identifiers happen to be visited in.
pub(super) struct RunState<V> {
    snapshot: Snapshot<V>,
    pending_values: HashSet<MarketDataId>,
    pending_time_series: HashSet<ObservableId>,
    seen_values: HashSet<MarketDataId>,
    seen_time_series: HashSet<ObservableId>,
    value_failures: HashMap<MarketDataId, MarketDataError>,
    time_series_failures: HashMap<ObservableId, MarketDataError>,
    requirements_cache: HashMap<DerivedId, Requirements>,
    diagnostics: ResolutionDiagnostics,
    staged_values: Vec<(MarketDataId, V)>,
    staged_series: Vec<(ObservableId, TimeSeries)>,
    staged_failures: Vec<(MarketDataId, MarketDataError)>,
    failed_this_round: usize,
    discovered_this_round: usize,
}

impl<V> RunState<V> {
    /// Seed the run: everything requested goes pending unless the base
    /// snapshot already holds it.
    pub(super) fn new(requirements: Requirements, base: Snapshot<V>) -> Self {
        let mut state = Self {
            snapshot: base,
            pending_values: HashSet::new(),
            pending_time_series: HashSet::new(),
            seen_values: HashSet::new(),
            seen_time_series: HashSet::new(),
            value_failures: HashMap::new(),
            time_series_failures: HashMap::new(),
            requirements_cache: HashMap::new(),
            diagnostics: ResolutionDiagnostics::default(),
            staged_values: Vec::new(),
            staged_series: Vec::new(),
            staged_failures: Vec::new(),
            failed_this_round: 0,
            discovered_this_round: 0,
        };
        for id in requirements.values() {
            state.enqueue_value(id.clone());
        }
        for id in requirements.time_series() {
            state.enqueue_time_series(id.clone());
        }
        state
    }

    pub(super) fn begin_round(&mut self) {
        self.diagnostics.rounds += 1;
        self.failed_this_round = 0;
        self.discovered_this_round = 0;
    }

    pub(super) fn round(&self) -> u32 {
        self.diagnostics.rounds
    }

    pub(super) fn nothing_pending(&self) -> bool {
        self.pending_values.is_empty() && self.pending_time_series.is_empty()
    }

    pub(super) fn pending_counts(&self) -> (usize, usize) {
        (self.pending_values.len(), self.pending_time_series.len())
    }

    pub(super) fn take_pending_values(&mut self) -> Vec<MarketDataId> {
        self.pending_values.drain().collect()
    }

    pub(super) fn take_pending_time_series(&mut self) -> Vec<ObservableId> {
        self.pending_time_series.drain().collect()
    }

    /// Put a derived identifier back for the next round.
    pub(super) fn keep_pending(&mut self, id: MarketDataId) {
        self.pending_values.insert(id);
    }

    /// Enqueue the sub-requirements a builder declared, skipping everything
    /// already known. Newly enqueued identifiers are processed from the
    /// next round on.
    pub(super) fn discover(&mut self, requirements: &Requirements) -> usize {
        let mut count = 0;
        for id in requirements.values() {
            if self.enqueue_value(id.clone()) {
                count += 1;
            }
        }
        for id in requirements.time_series() {
            if self.enqueue_time_series(id.clone()) {
                count += 1;
            }
        }
        self.discovered_this_round += count;
        self.diagnostics.requirements_discovered += count;
        count
    }

    pub(super) fn snapshot(&self) -> &Snapshot<V> {
        &self.snapshot
    }

    /// Record a source-path failure, visible to dependency checks in the
    /// same round.
    pub(super) fn fail_value_now(&mut self, id: MarketDataId, error: MarketDataError) {
        self.value_failures.insert(id, error);
        self.failed_this_round += 1;
    }

    pub(super) fn fail_time_series_now(&mut self, id: ObservableId, error: MarketDataError) {
        self.time_series_failures.insert(id, error);
        self.failed_this_round += 1;
    }

    /// Stage a resolved value; it enters the snapshot when the round ends.
    pub(super) fn stage_value(&mut self, id: MarketDataId, value: V) {
        self.staged_values.push((id, value));
    }

    pub(super) fn stage_series(&mut self, id: ObservableId, series: TimeSeries) {
        self.staged_series.push((id, series));
    }

    /// Stage a derived-path failure; it is recorded when the round ends.
    pub(super) fn stage_failure(&mut self, id: MarketDataId, error: MarketDataError) {
        self.staged_failures.push((id, error));
    }

    pub(super) fn cached_requirements(&self, id: &DerivedId) -> Option<Requirements> {
        self.requirements_cache.get(id).cloned()
    }

    pub(super) fn cache_requirements(&mut self, id: DerivedId, requirements: Requirements) {
        self.requirements_cache.insert(id, requirements);
    }

    /// Check a derived identifier's prerequisites against the round-start
    /// snapshot and the failures recorded so far.
    pub(super) fn dependency_status(&self, requirements: &Requirements) -> DependencyStatus {
        let mut failed: Option<MarketDataId> = None;
        let mut waiting = false;

        for id in requirements.values() {
            if self.snapshot.contains_value(id) {
                continue;
            }
            waiting = true;
            if self.value_failures.contains_key(id) {
                consider_failed(&mut failed, id.clone());
            }
        }
        for id in requirements.time_series() {
            if self.snapshot.contains_time_series(id) {
                continue;
            }
            waiting = true;
            if self.time_series_failures.contains_key(id) {
                consider_failed(&mut failed, MarketDataId::Observable(id.clone()));
            }
        }

        if let Some(id) = failed {
            DependencyStatus::FailedDependency(id)
        } else if waiting {
            DependencyStatus::Waiting
        } else {
            DependencyStatus::AllResolved
        }
    }

    /// Merge the round's staged output. Returns whether the round made
    /// progress: resolved, failed, or discovered anything.
    pub(super) fn end_round(&mut self) -> bool {
        let resolved = self.staged_values.len() + self.staged_series.len();
        let failed = self.failed_this_round + self.staged_failures.len();

        self.diagnostics.values_resolved += self.staged_values.len();
        self.diagnostics.time_series_resolved += self.staged_series.len();

        for (id, error) in self.staged_failures.drain(..) {
            self.value_failures.insert(id, error);
        }
        let values = std::mem::take(&mut self.staged_values);
        let series = std::mem::take(&mut self.staged_series);
        self.snapshot.extend_new_entries(values, series);

        resolved > 0 || failed > 0 || self.discovered_this_round > 0
    }

    /// Fail everything still pending once the run stops making progress.
    pub(super) fn fail_remaining_unresolved(&mut self) {
        let pending: Vec<_> = self.pending_values.drain().collect();
        for id in pending {
            let error = MarketDataError::Unresolved(id.clone());
            self.value_failures.insert(id, error);
        }
        let pending_series: Vec<_> = self.pending_time_series.drain().collect();
        for id in pending_series {
            let error = MarketDataError::Unresolved(MarketDataId::Observable(id.clone()));
            self.time_series_failures.insert(id, error);
        }
    }

    pub(super) fn into_result(self) -> MarketDataResult<V> {
        MarketDataResult::new(
            self.snapshot,
            self.value_failures,
            self.time_series_failures,
            self.diagnostics,
        )
    }

    fn enqueue_value(&mut self, id: MarketDataId) -> bool {
        if self.snapshot.contains_value(&id) || !self.seen_values.insert(id.clone()) {
            return false;
        }
        self.pending_values.insert(id);
        true
    }

    fn enqueue_time_series(&mut self, id: ObservableId) -> bool {
        if self.snapshot.contains_time_series(&id) || !self.seen_time_series.insert(id.clone()) {
            return false;
        }
        self.pending_time_series.insert(id);
        true
    }
}

/// Keep the display-wise smallest failed prerequisite, so the error a
/// dependent reports does not depend on hash iteration order.
fn consider_failed(current: &mut Option<MarketDataId>, candidate: MarketDataId) {
    let replace = match current {
        Some(existing) => candidate.to_string() < existing.to_string(),
        None => true,
    };
    if replace {
        *current = Some(candidate);
    }
}
