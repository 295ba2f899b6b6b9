//! Builder trait for derived market data.
//!
//! Builders are how domain logic plugs into the engine: each one declares
//! the kind of derived identifier it handles, the data that kind depends
//! on, and how to construct a value once those dependencies are available.

use crate::errors::MarketDataError;
use crate::models::{DataKind, DerivedId, Requirements, Snapshot};

/// Builds one kind of derived market data from other market data.
///
/// Implementations are pure functions of their inputs: the same identifier
/// always declares the same requirements, and the same snapshot always
/// builds the same value. The engine relies on this to cache declared
/// requirements within a run.
///
/// # Example
///
/// ```ignore
/// use mosaic_market_data::{DataKind, DerivedId, MarketDataBuilder, Requirements, Snapshot};
///
/// struct DiscountCurveBuilder;
///
/// impl MarketDataBuilder<CurveValue> for DiscountCurveBuilder {
///     fn kind(&self) -> DataKind {
///         DataKind::new("DiscountCurve")
///     }
///
///     fn requirements(&self, id: &DerivedId) -> Requirements {
///         Requirements::empty().add_values(node_quote_ids(id))
///     }
///
///     fn build(&self, id: &DerivedId, data: &Snapshot<CurveValue>) -> Result<CurveValue, MarketDataError> {
///         calibrate(id, data)
///     }
/// }
/// ```
pub trait MarketDataBuilder<V>: Send + Sync {
    /// The kind of derived identifier this builder handles.
    ///
    /// Exactly one builder per kind may be registered.
    fn kind(&self) -> DataKind;

    /// The market data needed before `id` can be built.
    ///
    /// Declared requirements may themselves be derived identifiers; the
    /// engine resolves the whole chain.
    fn requirements(&self, id: &DerivedId) -> Requirements;

    /// Build the value for `id`.
    ///
    /// Every identifier declared by [`requirements`](Self::requirements)
    /// has resolved and is present in `data` by the time this runs.
    fn build(&self, id: &DerivedId, data: &Snapshot<V>) -> Result<V, MarketDataError>;
}
