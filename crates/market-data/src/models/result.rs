use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::id::{MarketDataId, ObservableId};
use super::snapshot::Snapshot;
use crate::errors::MarketDataError;

/// Outcome of one resolution run.
///
/// Everything that resolved is in the snapshot; everything that did not is
/// in exactly one of the failure maps under the identifier that failed.
/// Requirements the caller never asked for (discovered dependencies) report
/// through the identifier that needed them.
#[derive(Clone, Debug)]
pub struct MarketDataResult<V> {
    snapshot: Snapshot<V>,
    single_value_failures: HashMap<MarketDataId, MarketDataError>,
    time_series_failures: HashMap<ObservableId, MarketDataError>,
    diagnostics: ResolutionDiagnostics,
}

impl<V> MarketDataResult<V> {
    pub(crate) fn new(
        snapshot: Snapshot<V>,
        single_value_failures: HashMap<MarketDataId, MarketDataError>,
        time_series_failures: HashMap<ObservableId, MarketDataError>,
        diagnostics: ResolutionDiagnostics,
    ) -> Self {
        Self {
            snapshot,
            single_value_failures,
            time_series_failures,
            diagnostics,
        }
    }

    pub fn snapshot(&self) -> &Snapshot<V> {
        &self.snapshot
    }

    /// Consume the result, keeping only the snapshot.
    pub fn into_snapshot(self) -> Snapshot<V> {
        self.snapshot
    }

    /// Why each requested or discovered single value is absent.
    pub fn single_value_failures(&self) -> &HashMap<MarketDataId, MarketDataError> {
        &self.single_value_failures
    }

    /// Why each requested time series is absent.
    pub fn time_series_failures(&self) -> &HashMap<ObservableId, MarketDataError> {
        &self.time_series_failures
    }

    /// True when every requirement resolved.
    pub fn is_complete(&self) -> bool {
        self.single_value_failures.is_empty() && self.time_series_failures.is_empty()
    }

    pub fn diagnostics(&self) -> &ResolutionDiagnostics {
        &self.diagnostics
    }
}

/// Counters describing how a resolution run went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionDiagnostics {
    /// Rounds executed before the run reached its fixed point.
    pub rounds: u32,

    /// Single values resolved across all rounds.
    pub values_resolved: usize,

    /// Time series resolved across all rounds.
    pub time_series_resolved: usize,

    /// Identifiers first seen as builder dependencies rather than in the
    /// caller's requirements.
    pub requirements_discovered: usize,
}
