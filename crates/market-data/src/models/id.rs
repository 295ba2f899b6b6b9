use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{DataKind, FieldName, MarketDataFeed, MarketDataKey, StandardId};

/// Identifies a single value observable on an external feed, such as the
/// market value of an instrument quoted by a vendor.
///
/// Observable identifiers always resolve to a decimal value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObservableId {
    id: StandardId,
    field: FieldName,
    feed: MarketDataFeed,
}

impl ObservableId {
    /// Identifier for the market value of `id`, with no feed assigned yet.
    pub fn of(id: StandardId) -> Self {
        Self {
            id,
            field: FieldName::MARKET_VALUE,
            feed: MarketDataFeed::NONE,
        }
    }

    /// Identifier for the market value of `id` observed on `feed`.
    pub fn of_feed(id: StandardId, feed: MarketDataFeed) -> Self {
        Self {
            id,
            field: FieldName::MARKET_VALUE,
            feed,
        }
    }

    /// Fully specified identifier.
    pub fn new(id: StandardId, field: FieldName, feed: MarketDataFeed) -> Self {
        Self { id, field, feed }
    }

    /// The same identifier pointed at a different feed.
    pub fn with_feed(&self, feed: MarketDataFeed) -> Self {
        Self {
            id: self.id.clone(),
            field: self.field.clone(),
            feed,
        }
    }

    pub fn standard_id(&self) -> &StandardId {
        &self.id
    }

    pub fn field(&self) -> &FieldName {
        &self.field
    }

    pub fn feed(&self) -> &MarketDataFeed {
        &self.feed
    }
}

impl fmt::Display for ObservableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.id, self.field, self.feed)
    }
}

/// Identifies a derived value produced by the builder registered for its
/// kind, such as a calibrated curve keyed by its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivedId {
    kind: DataKind,
    key: StandardId,
}

impl DerivedId {
    pub fn new(kind: DataKind, key: StandardId) -> Self {
        Self { kind, key }
    }

    pub fn kind(&self) -> &DataKind {
        &self.kind
    }

    pub fn key(&self) -> &StandardId {
        &self.key
    }
}

impl fmt::Display for DerivedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.key)
    }
}

/// Identifier for a single item of market data.
///
/// The two sentinel variants are produced upstream when a requested key
/// could not be turned into a real identifier; they are statically
/// distinguishable here and always fail to resolve.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketDataId {
    /// Externally observable value fetched from a feed.
    Observable(ObservableId),

    /// Derived value built from other market data.
    Derived(DerivedId),

    /// Sentinel: no mapping from the original key to an identifier existed.
    MissingMapping(MarketDataKey),

    /// Sentinel: the upstream rule set had no rule for the calculation that
    /// requested the original key.
    NoMatchingRule(MarketDataKey),
}

impl From<ObservableId> for MarketDataId {
    fn from(id: ObservableId) -> Self {
        Self::Observable(id)
    }
}

impl From<DerivedId> for MarketDataId {
    fn from(id: DerivedId) -> Self {
        Self::Derived(id)
    }
}

impl fmt::Display for MarketDataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Observable(id) => id.fmt(f),
            Self::Derived(id) => id.fmt(f),
            Self::MissingMapping(key) | Self::NoMatchingRule(key) => key.fmt(f),
        }
    }
}
