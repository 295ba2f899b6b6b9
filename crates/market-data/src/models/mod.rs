//! Market data models
//!
//! This module contains the core data types for market data resolution:
//! - `types` - Identifier building blocks (StandardId, FieldName, MarketDataFeed, DataKind, MarketDataKey)
//! - `id` - Market data identifiers (ObservableId, DerivedId, MarketDataId)
//! - `requirements` - Deduplicated requirement sets (Requirements)
//! - `snapshot` - Immutable per-date data container (Snapshot)
//! - `result` - Resolution outcome and run counters (MarketDataResult, ResolutionDiagnostics)

mod id;
mod requirements;
mod result;
mod snapshot;
mod types;

pub use id::{DerivedId, MarketDataId, ObservableId};
pub use requirements::Requirements;
pub use result::{MarketDataResult, ResolutionDiagnostics};
pub use snapshot::Snapshot;
pub use types::{DataKind, FieldName, MarketDataFeed, MarketDataKey, StandardId};
