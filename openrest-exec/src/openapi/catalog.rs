use indexmap::IndexMap;
use openrest_core::{
    map_schema_type, ErrorKind, ErrorList, OpenApiDocument, OperationMetadata, ParameterLocation,
    ParameterSpec, SpecVersion, StepError, ValueType,
};
use serde_json::Value as JsonValue;

use super::refs::resolve;
use crate::executor::primitive_text;

/// The parameters an operation accepts, keyed by name, in binding order.
///
/// Declared parameters come first (required before optional), then security-scheme
/// parameters, then the body. When two entries share a name the earlier one is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterCatalog {
    entries: IndexMap<String, ParameterSpec>,
}

impl ParameterCatalog {
    pub fn from_specs(specs: impl IntoIterator<Item = ParameterSpec>) -> Self {
        let mut entries = IndexMap::new();
        for spec in specs {
            if entries.contains_key(&spec.name) {
                tracing::debug!(parameter = %spec.name, kind = spec.kind_name(), "parameter shadowed by an earlier entry");
                continue;
            }
            entries.insert(spec.name.clone(), spec);
        }
        Self { entries }
    }

    pub fn build(metadata: &OperationMetadata) -> Result<Self, ErrorList> {
        let document = metadata.document.as_ref();
        let raw = &document.raw;
        let path_item = raw
            .get("paths")
            .and_then(|p| p.get(&metadata.path))
            .unwrap_or(&JsonValue::Null);
        let operation = path_item.get(metadata.verb.key()).unwrap_or(&JsonValue::Null);

        let mut errors = Vec::<StepError>::new();
        let mut fail = |message: String| {
            errors.push(
                ErrorKind::InvalidSpecification(format!("{}: {message}", metadata.name())).into(),
            )
        };

        let mut declared = Vec::new();
        let mut body = None;
        for param in merged_parameters(raw, path_item, operation, &mut fail) {
            match param.get("in").and_then(|v| v.as_str()) {
                Some("body") => {
                    body = Some(
                        ParameterSpec::body(bool_field(param, "required"))
                            .with_description(string_field(param, "description")),
                    )
                }
                Some("formData") => tracing::warn!(
                    operation = metadata.name(),
                    parameter = ?param.get("name"),
                    "formData parameters are not supported; skipping"
                ),
                _ => match declared_parameter(document, param) {
                    Ok(spec) => declared.push(spec),
                    Err(message) => fail(message),
                },
            }
        }
        // Stable: keeps document order within each group.
        declared.sort_by_key(|p: &ParameterSpec| !p.required);

        let security = security_parameters(document, operation, &mut fail);

        if let Some(request_body) = operation.get("requestBody") {
            match resolve(raw, request_body) {
                Ok(rb) => {
                    body = Some(
                        ParameterSpec::body(bool_field(rb, "required"))
                            .with_description(string_field(rb, "description")),
                    )
                }
                Err(e) => fail(format!("requestBody: {e}")),
            }
        }

        if let Some(errors) = ErrorList::from_errors(errors) {
            return Err(errors);
        }
        Ok(Self::from_specs(declared.into_iter().chain(security).chain(body)))
    }

    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Path-item parameters overlaid by operation parameters with the same (name, in).
fn merged_parameters<'a>(
    raw: &'a JsonValue,
    path_item: &'a JsonValue,
    operation: &'a JsonValue,
    fail: &mut impl FnMut(String),
) -> Vec<&'a JsonValue> {
    let mut merged: IndexMap<(String, String), &'a JsonValue> = IndexMap::new();
    for (scope, owner) in [("path item", path_item), ("operation", operation)] {
        let Some(params) = owner.get("parameters").and_then(|p| p.as_array()) else {
            continue;
        };
        for p in params {
            let param = match resolve(raw, p) {
                Ok(param) => param,
                Err(e) => {
                    fail(format!("{scope} parameter: {e}"));
                    continue;
                }
            };
            let key = (
                string_field(param, "name").unwrap_or_default(),
                string_field(param, "in").unwrap_or_default(),
            );
            merged.insert(key, param);
        }
    }
    merged.into_values().collect()
}

fn declared_parameter(document: &OpenApiDocument, param: &JsonValue) -> Result<ParameterSpec, String> {
    let name = string_field(param, "name").ok_or("parameter without a name")?;
    let location_key = string_field(param, "in").unwrap_or_default();
    let location = ParameterLocation::parse(&location_key)
        .ok_or_else(|| format!("parameter '{name}': unknown location '{location_key}'"))?;

    // Swagger 2 keeps type information on the parameter itself.
    let schema = match document.version {
        SpecVersion::Swagger2 => Some(param),
        SpecVersion::OpenApi3 => param.get("schema").or_else(|| {
            param
                .get("content")
                .and_then(|c| c.as_object())
                .and_then(|c| c.values().next())
                .and_then(|media| media.get("schema"))
        }),
    };

    let value_type = match schema {
        Some(schema) => map_schema_type(schema, document)
            .map_err(|e| format!("parameter '{name}': {e}"))?,
        None => ValueType::Text,
    };

    let default_value = schema
        .and_then(|s| resolve(&document.raw, s).ok())
        .and_then(|s| s.get("default"))
        .map(primitive_text);

    let required = location == ParameterLocation::Path || bool_field(param, "required");
    Ok(
        ParameterSpec::named(name, location, required, default_value, value_type)
            .with_description(string_field(param, "description")),
    )
}

fn security_parameters(
    document: &OpenApiDocument,
    operation: &JsonValue,
    fail: &mut impl FnMut(String),
) -> Vec<ParameterSpec> {
    let requirements = operation
        .get("security")
        .or_else(|| document.raw.get("security"))
        .and_then(|s| s.as_array());
    let Some(requirements) = requirements else {
        return Vec::new();
    };

    let schemes = document.security_schemes();
    let mut out = Vec::new();
    for requirement in requirements {
        let Some(requirement) = requirement.as_object() else {
            continue;
        };
        for scheme_name in requirement.keys() {
            let Some(scheme) = schemes.and_then(|s| s.get(scheme_name)) else {
                fail(format!("security scheme '{scheme_name}' is not defined"));
                continue;
            };
            match resolve(&document.raw, scheme) {
                Ok(scheme) => out.push(security_parameter(scheme_name, scheme)),
                Err(e) => fail(format!("security scheme '{scheme_name}': {e}")),
            }
        }
    }
    out
}

fn security_parameter(scheme_name: &str, scheme: &JsonValue) -> ParameterSpec {
    let description = string_field(scheme, "description");
    let spec = match scheme.get("type").and_then(|t| t.as_str()) {
        Some("apiKey") => ParameterSpec::security(
            string_field(scheme, "name").unwrap_or_else(|| scheme_name.to_string()),
            scheme
                .get("in")
                .and_then(|v| v.as_str())
                .and_then(ParameterLocation::parse),
        ),
        Some("http" | "basic" | "oauth2" | "openIdConnect") => {
            ParameterSpec::security("Authorization", Some(ParameterLocation::Header))
        }
        _ => ParameterSpec::security(scheme_name, None),
    };
    spec.with_description(description)
}

fn string_field(node: &JsonValue, key: &str) -> Option<String> {
    node.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

fn bool_field(node: &JsonValue, key: &str) -> bool {
    node.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}
