use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::naming::{apply_alias, generated_name};
use crate::parser::OpenApiDocument;

use super::HttpVerb;

/// One (path, verb) pair of a loaded document, plus everything needed to call it.
#[derive(Debug, Clone)]
pub struct OperationMetadata {
    pub service_name: String,
    pub document: Arc<OpenApiDocument>,
    pub path: String,
    pub server_url: String,
    pub verb: HttpVerb,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub aliases: Option<Arc<BTreeMap<String, String>>>,
    name: String,
}

impl OperationMetadata {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        service_name: impl Into<String>,
        document: Arc<OpenApiDocument>,
        path: impl Into<String>,
        server_url: impl Into<String>,
        verb: HttpVerb,
        operation_id: Option<String>,
        summary: Option<String>,
        aliases: Option<Arc<BTreeMap<String, String>>>,
    ) -> Self {
        let service_name = service_name.into();
        let path = path.into();
        let name = apply_alias(
            generated_name(&service_name, operation_id.as_deref(), &path, verb),
            aliases.as_deref(),
        );
        Self {
            service_name,
            document,
            path,
            server_url: server_url.into(),
            verb,
            operation_id,
            summary,
            aliases,
            name,
        }
    }

    /// Generated, sanitised and aliased name this operation is exposed under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for OperationMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
