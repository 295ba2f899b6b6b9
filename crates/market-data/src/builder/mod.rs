//! Derived market data builders and their registry.
//!
//! This module contains:
//! - The `MarketDataBuilder` trait that domain builders implement
//! - The `BuilderRegistry` mapping each data kind to its single builder
//!
//! Builders never fetch anything themselves. They declare requirements,
//! the engine resolves them, and only then is `build` invoked with a
//! snapshot guaranteed to contain every declared dependency.

mod registry;
mod traits;

// Re-exports
pub use registry::BuilderRegistry;
pub use traits::MarketDataBuilder;
