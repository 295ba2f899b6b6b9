//! Registry of derived-data builders keyed by kind.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::errors::DuplicateBuilderError;
use crate::models::DataKind;

use super::traits::MarketDataBuilder;

/// Immutable kind-to-builder table assembled when the engine is built.
pub struct BuilderRegistry<V> {
    builders: HashMap<DataKind, Arc<dyn MarketDataBuilder<V>>>,
}

impl<V> BuilderRegistry<V> {
    /// Create a registry from a list of builders.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateBuilderError`] when two builders declare the same
    /// kind. Which builder would win is undefined, so this is rejected
    /// outright rather than resolved by ordering.
    pub fn new(
        builders: Vec<Arc<dyn MarketDataBuilder<V>>>,
    ) -> Result<Self, DuplicateBuilderError> {
        let mut table: HashMap<DataKind, Arc<dyn MarketDataBuilder<V>>> =
            HashMap::with_capacity(builders.len());

        for builder in builders {
            let kind = builder.kind();
            debug!("Registering builder for kind '{}'", kind);
            if table.insert(kind.clone(), builder).is_some() {
                return Err(DuplicateBuilderError { kind });
            }
        }

        Ok(Self { builders: table })
    }

    /// A registry with no builders. Every derived identifier fails as
    /// missing a builder.
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    pub fn get(&self, kind: &DataKind) -> Option<&Arc<dyn MarketDataBuilder<V>>> {
        self.builders.get(kind)
    }

    pub fn contains(&self, kind: &DataKind) -> bool {
        self.builders.contains_key(kind)
    }

    /// Kinds with a registered builder, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = &DataKind> {
        self.builders.keys()
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl<V> Default for BuilderRegistry<V> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MarketDataError;
    use crate::models::{DerivedId, Requirements, Snapshot};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    struct FixedKindBuilder {
        kind: &'static str,
    }

    impl MarketDataBuilder<Decimal> for FixedKindBuilder {
        fn kind(&self) -> DataKind {
            DataKind::new(self.kind)
        }

        fn requirements(&self, _id: &DerivedId) -> Requirements {
            Requirements::empty()
        }

        fn build(
            &self,
            _id: &DerivedId,
            _data: &Snapshot<Decimal>,
        ) -> Result<Decimal, MarketDataError> {
            Ok(dec!(1))
        }
    }

    #[test]
    fn test_lookup_by_kind() {
        let registry = BuilderRegistry::new(vec![
            Arc::new(FixedKindBuilder { kind: "Curve" }),
            Arc::new(FixedKindBuilder { kind: "Surface" }),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&DataKind::new("Curve")));
        assert!(registry.get(&DataKind::new("Surface")).is_some());
        assert!(registry.get(&DataKind::new("Cube")).is_none());
    }

    #[test]
    fn test_duplicate_kind_rejected() {
        let result = BuilderRegistry::new(vec![
            Arc::new(FixedKindBuilder { kind: "Curve" }),
            Arc::new(FixedKindBuilder { kind: "Curve" }),
        ]);

        assert_eq!(
            result.err().map(|e| e.kind),
            Some(DataKind::new("Curve"))
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry: BuilderRegistry<Decimal> = BuilderRegistry::empty();
        assert!(registry.is_empty());
        assert!(!registry.contains(&DataKind::new("Curve")));
    }
}
