use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde_json::Value as JsonValue;

use super::http::HttpClientFactory;

/// Shared state a run evaluates its arguments against, plus the injected HTTP client factory.
pub struct RuntimeState {
    variables: RwLock<BTreeMap<String, JsonValue>>,
    http: Arc<dyn HttpClientFactory>,
}

impl RuntimeState {
    pub fn new(http: Arc<dyn HttpClientFactory>) -> Self {
        Self {
            variables: RwLock::new(BTreeMap::new()),
            http,
        }
    }

    pub fn with_variables(self, variables: BTreeMap<String, JsonValue>) -> Self {
        *self.variables.write().unwrap_or_else(|e| e.into_inner()) = variables;
        self
    }

    pub fn http(&self) -> &Arc<dyn HttpClientFactory> {
        &self.http
    }

    pub fn get_variable(&self, name: &str) -> Option<JsonValue> {
        let guard = self.variables.read().unwrap_or_else(|e| e.into_inner());
        guard.get(name).cloned()
    }

    pub fn set_variable(&self, name: impl Into<String>, value: JsonValue) {
        let mut guard = self.variables.write().unwrap_or_else(|e| e.into_inner());
        guard.insert(name.into(), value);
    }

    pub fn variables(&self) -> BTreeMap<String, JsonValue> {
        self.variables
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl std::fmt::Debug for RuntimeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeState")
            .field("variables", &self.variables())
            .finish_non_exhaustive()
    }
}
