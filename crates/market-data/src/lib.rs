//! Mosaic Market Data Crate
//!
//! This crate assembles complete market data snapshots from declarative
//! requirements for the Mosaic valuation stack.
//!
//! # Overview
//!
//! Callers describe the data a set of calculations needs as
//! [`Requirements`]; the [`MarketDataEngine`] works out how to satisfy
//! them:
//!
//! - Observable values are fetched from an [`ObservableSource`], batched
//!   so each resolution round makes one source call
//! - Historical series come from a [`TimeSeriesSource`]
//! - Derived data is produced by [`MarketDataBuilder`]s, which declare
//!   their own requirements and run once those have resolved
//! - Failures are recorded per identifier and never abort the run
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Requirements   | --> |   MarketDataId   |  (what is needed)
//! +------------------+     +------------------+
//!                                   |
//!                                   v
//!                          +------------------+
//!                          | MarketDataEngine |  (rounds to fixed point)
//!                          +------------------+
//!                       observable |   | derived
//!                          +-------+   +-------+
//!                          v                   v
//!                 +----------------+  +-------------------+
//!                 | FeedTranslator |  | MarketDataBuilder |  (one per kind)
//!                 +----------------+  +-------------------+
//!                          |                   |
//!                          v                   | declares further
//!                 +------------------+         | requirements
//!                 | ObservableSource |<--------+
//!                 | TimeSeriesSource |
//!                 +------------------+
//!                          |
//!                          v
//!                 +------------------+
//!                 |     Snapshot     |  (immutable result data)
//!                 +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ObservableId`] - externally observed value, translated per feed
//! - [`DerivedId`] - value built from other data by its kind's builder
//! - [`Requirements`] - the values and time series something needs
//! - [`Snapshot`] - immutable market data for one valuation date
//! - [`MarketDataResult`] - snapshot plus per-identifier failures
//! - [`MarketDataError`] - failure taxonomy, classified by [`FailureReason`]

pub mod builder;
pub mod engine;
pub mod errors;
pub mod models;
pub mod source;

// Re-export all public types from models
pub use models::{
    DataKind, DerivedId, FieldName, MarketDataFeed, MarketDataId, MarketDataKey, MarketDataResult,
    ObservableId, Requirements, ResolutionDiagnostics, Snapshot, StandardId,
};

// Re-export the engine and builder types
pub use builder::{BuilderRegistry, MarketDataBuilder};
pub use engine::MarketDataEngine;

// Re-export source traits and trivial implementations
pub use source::{
    EmptyObservableSource, EmptyTimeSeriesSource, FeedTranslator, IdentityTranslator,
    ObservableSource, TimeSeriesSource,
};

// Re-export error types
pub use errors::{DuplicateBuilderError, FailureReason, MarketDataError};
