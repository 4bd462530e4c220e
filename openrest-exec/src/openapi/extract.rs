use std::collections::BTreeMap;
use std::sync::Arc;

use openrest_core::{ErrorKind, ErrorList, HttpVerb, OpenApiDocument, OperationMetadata};
use serde_json::Value as JsonValue;

use super::servers::select_server_url;

/// Everything besides the document that goes into an operation's identity.
#[derive(Debug, Clone, Default)]
pub struct ServiceContext {
    pub service_name: String,
    pub base_url: String,
    pub aliases: Option<Arc<BTreeMap<String, String>>>,
}

impl ServiceContext {
    pub fn new(service_name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            base_url: base_url.into(),
            aliases: None,
        }
    }

    pub fn with_aliases(mut self, aliases: Option<BTreeMap<String, String>>) -> Self {
        self.aliases = aliases.map(Arc::new);
        self
    }
}

/// Emits one [`OperationMetadata`] per (path, verb) pair, in document order.
pub fn extract_operations(
    document: Arc<OpenApiDocument>,
    service: &ServiceContext,
) -> Result<Vec<OperationMetadata>, ErrorList> {
    let paths = match document.paths() {
        Some(paths) if !paths.is_empty() => paths,
        _ => {
            return Err(ErrorKind::InvalidSpecification(format!(
                "'{}': document has no paths",
                service.service_name
            ))
            .into())
        }
    };

    let mut operations = Vec::new();
    for (path, item) in paths {
        for verb in HttpVerb::ALL {
            let Some(operation) = item.get(verb.key()) else {
                continue;
            };
            let server_url = select_server_url(&document, item, operation, &service.base_url);
            let metadata = OperationMetadata::new(
                service.service_name.clone(),
                Arc::clone(&document),
                path.clone(),
                server_url,
                verb,
                string_field(operation, "operationId"),
                string_field(operation, "summary").or_else(|| string_field(operation, "description")),
                service.aliases.clone(),
            );
            tracing::debug!(name = metadata.name(), %path, verb = verb.as_method(), "extracted operation");
            operations.push(metadata);
        }
    }
    Ok(operations)
}

fn string_field(node: &JsonValue, key: &str) -> Option<String> {
    node.get(key).and_then(|v| v.as_str()).map(str::to_string)
}
