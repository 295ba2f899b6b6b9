//! Error types and failure classification for market data resolution.
//!
//! This module provides:
//! - [`MarketDataError`]: The error enum carried in result failure maps
//! - [`FailureReason`]: Classification of resolution failures
//! - [`DuplicateBuilderError`]: Engine construction error for conflicting builders

mod reason;

pub use reason::FailureReason;

use thiserror::Error;

use crate::models::{DataKind, MarketDataId, MarketDataKey, ObservableId};

/// Errors that can occur while resolving market data.
///
/// Each variant is classified into a [`FailureReason`] via the
/// [`reason`](Self::reason) method. Errors are values held in the result's
/// failure maps, so the enum is `Clone` and comparable.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum MarketDataError {
    /// No builder is registered for a derived identifier's kind.
    /// The identifier can never resolve with this engine configuration.
    #[error("No market data builder available to handle {0}")]
    MissingBuilder(MarketDataId),

    /// The identifier is the missing-mapping sentinel: the original key
    /// could not be mapped to a real identifier upstream.
    #[error("No market data mapping found for market data key {0}")]
    MissingMapping(MarketDataKey),

    /// The upstream rule set had no market data rule for the calculation
    /// that requested this data.
    #[error("No market data rule found for {0}")]
    NoMatchingRule(MarketDataKey),

    /// The observable source was asked for this identifier and returned
    /// nothing for it.
    #[error("No market data available for {0}")]
    NoObservableData(ObservableId),

    /// The time series source had no historical series for this identifier.
    #[error("No time series found for {0}")]
    NoTimeSeries(ObservableId),

    /// A prerequisite of a derived identifier failed to resolve, so its
    /// builder was never run. Names the first failed prerequisite.
    #[error("No value for {0}")]
    MissingDependency(MarketDataId),

    /// The identifier was still pending when assembly stopped making
    /// progress, typically because its dependencies form a cycle.
    #[error("Unable to resolve {0}: its dependencies never resolved")]
    Unresolved(MarketDataId),

    /// A builder or source panicked or failed outside its error channel.
    /// The fault is confined to this identifier.
    #[error("Source failure for {id}: {message}")]
    SourceFailure {
        /// Display form of the identifier being resolved when the fault hit
        id: String,
        /// Panic payload or out-of-band error text
        message: String,
    },
}

impl MarketDataError {
    /// Returns the failure classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_market_data::{FailureReason, MarketDataError, ObservableId, StandardId};
    ///
    /// let id = ObservableId::of(StandardId::new("vendor", "EUR-GBP"));
    /// let error = MarketDataError::NoTimeSeries(id);
    /// assert_eq!(error.reason(), FailureReason::MissingData);
    /// ```
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::MissingBuilder(_) => FailureReason::MissingBuilder,
            Self::MissingMapping(_) => FailureReason::MissingMapping,
            Self::NoMatchingRule(_) => FailureReason::NoMatchingRule,

            // Both value and time series gaps are missing data
            Self::NoObservableData(_) | Self::NoTimeSeries(_) => FailureReason::MissingData,

            Self::MissingDependency(_) => FailureReason::MissingDependency,
            Self::Unresolved(_) => FailureReason::Unresolved,
            Self::SourceFailure { .. } => FailureReason::SourceFailure,
        }
    }
}

/// Two builders declared the same kind when the engine was constructed.
///
/// This is a configuration error, not a resolution failure: it is returned
/// from registry construction and never appears in result failure maps.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("Duplicate builder registered for kind {kind}")]
pub struct DuplicateBuilderError {
    /// The kind declared by more than one builder
    pub kind: DataKind,
}
