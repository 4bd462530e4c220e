use std::collections::HashSet;

use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefError {
    #[error("unsupported external $ref: {0}")]
    ExternalRef(String),
    #[error("unresolvable $ref: {0}")]
    NotFound(String),
    #[error("cyclic $ref: {0}")]
    Cycle(String),
}

/// Follows `$ref` chains from `node` until a non-reference object is reached.
pub(crate) fn resolve<'a>(doc: &'a JsonValue, node: &'a JsonValue) -> Result<&'a JsonValue, RefError> {
    let mut visited = HashSet::new();
    let mut current = node;
    while let Some(reference) = current.get("$ref").and_then(|v| v.as_str()) {
        current = resolve_ref(doc, reference, &mut visited)?;
    }
    Ok(current)
}

fn resolve_ref<'a>(
    doc: &'a JsonValue,
    reference: &str,
    visited: &mut HashSet<String>,
) -> Result<&'a JsonValue, RefError> {
    let Some(pointer) = reference.strip_prefix('#') else {
        return Err(RefError::ExternalRef(reference.to_string()));
    };
    if !visited.insert(reference.to_string()) {
        return Err(RefError::Cycle(reference.to_string()));
    }
    doc.pointer(pointer)
        .ok_or_else(|| RefError::NotFound(reference.to_string()))
}
