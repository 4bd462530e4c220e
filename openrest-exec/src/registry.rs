use std::sync::Arc;

use indexmap::IndexMap;
use openrest_core::ErrorList;

use crate::factory::OperationFactory;
use crate::openapi::{load_specification, SpecLoader};
use crate::settings::ConnectorSettings;

/// All generated operations across the configured specifications, by name.
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    factories: IndexMap<String, Arc<OperationFactory>>,
}

impl OperationRegistry {
    /// Loads every specification; errors from all of them are reported together.
    pub async fn load(settings: &ConnectorSettings, loader: &SpecLoader) -> Result<Self, ErrorList> {
        let mut registry = Self::default();
        let mut failures = Vec::new();
        for spec in &settings.specifications {
            match load_specification(spec, loader).await {
                Ok(factories) => registry.extend(factories),
                Err(errors) => failures.push(errors),
            }
        }
        match ErrorList::combine(failures) {
            Some(errors) => Err(errors),
            None => Ok(registry),
        }
    }

    pub fn from_factories(factories: impl IntoIterator<Item = OperationFactory>) -> Self {
        let mut registry = Self::default();
        registry.extend(factories);
        registry
    }

    /// Adds factories; a name that is already registered keeps its first factory.
    pub fn extend(&mut self, factories: impl IntoIterator<Item = OperationFactory>) {
        for factory in factories {
            let name = factory.name().to_string();
            if self.factories.contains_key(&name) {
                tracing::warn!(operation = %name, "duplicate operation name; keeping the first definition");
                continue;
            }
            self.factories.insert(name, Arc::new(factory));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<OperationFactory>> {
        self.factories.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<OperationFactory>> {
        self.factories.values()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
