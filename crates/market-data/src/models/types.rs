use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// External identifier in `scheme/value` form.
///
/// The scheme names the identification system (a vendor namespace, an
/// internal catalogue), the value is the identifier within that scheme.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandardId {
    /// Identification scheme - mostly static constants
    scheme: Cow<'static, str>,

    /// Identifier within the scheme, discovered at runtime
    value: Arc<str>,
}

impl StandardId {
    pub fn new(scheme: impl Into<Cow<'static, str>>, value: impl Into<Arc<str>>) -> Self {
        Self {
            scheme: scheme.into(),
            value: value.into(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scheme, self.value)
    }
}

/// Named field of a market data record, such as the closing price.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldName(Cow<'static, str>);

impl FieldName {
    /// The default field: the market value of the instrument.
    pub const MARKET_VALUE: FieldName = FieldName(Cow::Borrowed("MarketValue"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named source of observable market data, e.g. a quote vendor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketDataFeed(Cow<'static, str>);

impl MarketDataFeed {
    /// No feed required; the data is expected to be supplied directly.
    pub const NONE: MarketDataFeed = MarketDataFeed(Cow::Borrowed("None"));

    /// Sentinel feed meaning the upstream rule set had no rule for the
    /// calculation that requested this data. Identifiers carrying this feed
    /// always fail to resolve.
    pub const NO_RULE: MarketDataFeed = MarketDataFeed(Cow::Borrowed("NoMatchingRule"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketDataFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static kind tag for derived market data.
///
/// Each kind is handled by exactly one registered builder; the tag is what
/// the engine dispatches on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataKind(Cow<'static, str>);

impl DataKind {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display form of an upstream market data key, carried by the sentinel
/// identifiers so failure messages can name what was originally requested.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketDataKey(Arc<str>);

impl MarketDataKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketDataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
