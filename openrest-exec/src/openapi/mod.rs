mod catalog;
mod extract;
mod loader;
mod refs;
mod servers;

use std::sync::Arc;

use openrest_core::{ErrorList, OpenApiDocument};

pub use catalog::ParameterCatalog;
pub use extract::{extract_operations, ServiceContext};
pub use loader::{parse_document, FileSystem, LocalFileSystem, SpecLoader, SpecSource};
pub use refs::RefError;

use crate::factory::OperationFactory;
use crate::settings::SpecificationSettings;

/// Builds a factory for every operation in `document`.
///
/// Catalog errors from all operations are reported together; nothing is returned unless
/// every operation could be built.
pub fn build_factories(
    document: Arc<OpenApiDocument>,
    service: &ServiceContext,
) -> Result<Vec<OperationFactory>, ErrorList> {
    let operations = extract_operations(document, service)?;
    let mut factories = Vec::with_capacity(operations.len());
    let mut failures = Vec::new();
    for metadata in operations {
        match ParameterCatalog::build(&metadata) {
            Ok(catalog) => factories.push(OperationFactory::new(metadata, catalog)),
            Err(errors) => failures.push(errors),
        }
    }
    match ErrorList::combine(failures) {
        Some(errors) => Err(errors),
        None => Ok(factories),
    }
}

/// Loads one configured specification and builds its factories.
pub async fn load_specification(
    settings: &SpecificationSettings,
    loader: &SpecLoader,
) -> Result<Vec<OperationFactory>, ErrorList> {
    let source = settings.source()?;
    let document = loader.load_document(&source).await?;
    let service = ServiceContext::new(settings.name.clone(), settings.base_url.clone())
        .with_aliases(settings.aliases.clone());
    let factories = build_factories(Arc::new(document), &service)?;
    tracing::info!(service = %settings.name, operations = factories.len(), "specification loaded");
    Ok(factories)
}
