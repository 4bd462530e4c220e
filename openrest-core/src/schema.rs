use serde_json::Value as JsonValue;

use crate::types::ValueType;

/// Resolves local `$ref` strings (`#/components/schemas/Pet`) to the node they point at.
pub trait RefLookup {
    fn lookup(&self, reference: &str) -> Option<&JsonValue>;
}

/// For schemas that are known not to contain references.
pub struct NoRefs;

impl RefLookup for NoRefs {
    fn lookup(&self, _reference: &str) -> Option<&JsonValue> {
        None
    }
}

impl RefLookup for JsonValue {
    fn lookup(&self, reference: &str) -> Option<&JsonValue> {
        let pointer = reference.strip_prefix('#')?;
        self.pointer(pointer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaTypeError {
    #[error("unsupported schema type '{ty}'{}", format_suffix(.format))]
    Unsupported { ty: String, format: Option<String> },
    #[error("unresolvable schema $ref: {0}")]
    UnresolvedRef(String),
    #[error("cyclic schema $ref: {0}")]
    CyclicRef(String),
}

fn format_suffix(format: &Option<String>) -> String {
    match format {
        Some(f) => format!(" with format '{f}'"),
        None => String::new(),
    }
}

/// Maps an OpenAPI schema node to the value type of the slot it describes.
pub fn map_schema_type(
    schema: &JsonValue,
    refs: &dyn RefLookup,
) -> Result<ValueType, SchemaTypeError> {
    let mut visiting = Vec::new();
    map_inner(schema, refs, &mut visiting)
}

fn map_inner<'a>(
    schema: &'a JsonValue,
    refs: &'a dyn RefLookup,
    visiting: &mut Vec<String>,
) -> Result<ValueType, SchemaTypeError> {
    if let Some(reference) = schema.get("$ref").and_then(|v| v.as_str()) {
        if visiting.iter().any(|r| r == reference) {
            return Err(SchemaTypeError::CyclicRef(reference.to_string()));
        }
        let target = refs
            .lookup(reference)
            .ok_or_else(|| SchemaTypeError::UnresolvedRef(reference.to_string()))?;
        visiting.push(reference.to_string());
        let mapped = map_inner(target, refs, visiting);
        visiting.pop();
        return mapped;
    }

    let format = schema.get("format").and_then(|v| v.as_str());
    match schema.get("type") {
        Some(JsonValue::String(ty)) => map_type(ty, format, schema, refs, visiting),
        // 3.1 style `type: [string, "null"]`
        Some(JsonValue::Array(types)) => {
            let non_null: Vec<&str> = types
                .iter()
                .filter_map(|t| t.as_str())
                .filter(|t| *t != "null")
                .collect();
            match non_null.as_slice() {
                [] => Ok(ValueType::Null),
                [single] => map_type(single, format, schema, refs, visiting),
                _ => Err(SchemaTypeError::Unsupported {
                    ty: non_null.join("|"),
                    format: format.map(str::to_string),
                }),
            }
        }
        Some(other) => Err(SchemaTypeError::Unsupported {
            ty: other.to_string(),
            format: format.map(str::to_string),
        }),
        None => {
            let composite = ["properties", "additionalProperties", "allOf", "oneOf", "anyOf"]
                .iter()
                .any(|k| schema.get(k).is_some());
            if composite {
                Ok(ValueType::StructuredObject)
            } else {
                Ok(ValueType::Text)
            }
        }
    }
}

fn map_type<'a>(
    ty: &str,
    format: Option<&str>,
    schema: &'a JsonValue,
    refs: &'a dyn RefLookup,
    visiting: &mut Vec<String>,
) -> Result<ValueType, SchemaTypeError> {
    match (ty, format) {
        ("string", Some("date" | "date-time")) => Ok(ValueType::Date),
        ("string", _) => Ok(ValueType::Text),
        ("number", None | Some("double" | "float")) => Ok(ValueType::Double),
        ("integer", _) => Ok(ValueType::Integer),
        ("boolean", _) => Ok(ValueType::Boolean),
        ("array", _) => {
            let item = match schema.get("items") {
                Some(items) => map_inner(items, refs, visiting)?,
                None => ValueType::Text,
            };
            Ok(ValueType::array_of(item))
        }
        ("object", _) => Ok(ValueType::StructuredObject),
        ("null", _) => Ok(ValueType::Null),
        (other, format) => Err(SchemaTypeError::Unsupported {
            ty: other.to_string(),
            format: format.map(str::to_string),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(schema: JsonValue) -> Result<ValueType, SchemaTypeError> {
        map_schema_type(&schema, &NoRefs)
    }

    #[test]
    fn strings_split_on_date_formats() {
        assert_eq!(map(json!({"type": "string", "format": "date"})), Ok(ValueType::Date));
        assert_eq!(map(json!({"type": "string", "format": "date-time"})), Ok(ValueType::Date));
        assert_eq!(map(json!({"type": "string", "format": "uuid"})), Ok(ValueType::Text));
        assert_eq!(map(json!({"type": "string"})), Ok(ValueType::Text));
    }

    #[test]
    fn integer_ignores_format() {
        assert_eq!(map(json!({"type": "integer", "format": "int64"})), Ok(ValueType::Integer));
    }

    #[test]
    fn number_with_unknown_format_is_rejected() {
        assert_eq!(map(json!({"type": "number", "format": "double"})), Ok(ValueType::Double));
        assert!(matches!(
            map(json!({"type": "number", "format": "decimal"})),
            Err(SchemaTypeError::Unsupported { .. })
        ));
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert_eq!(
            map(json!({"type": "file"})),
            Err(SchemaTypeError::Unsupported {
                ty: "file".into(),
                format: None
            })
        );
    }

    #[test]
    fn arrays_recurse_into_items() {
        assert_eq!(
            map(json!({"type": "array", "items": {"type": "array", "items": {"type": "boolean"}}})),
            Ok(ValueType::array_of(ValueType::array_of(ValueType::Boolean)))
        );
    }

    #[test]
    fn nullable_type_list_uses_the_non_null_member() {
        assert_eq!(map(json!({"type": ["integer", "null"]})), Ok(ValueType::Integer));
        assert_eq!(map(json!({"type": "null"})), Ok(ValueType::Null));
    }

    #[test]
    fn refs_are_followed_and_cycles_detected() {
        let doc = json!({
            "components": {
                "schemas": {
                    "Id": {"type": "integer"},
                    "Loop": {"type": "array", "items": {"$ref": "#/components/schemas/Loop"}}
                }
            }
        });
        let ids = json!({"type": "array", "items": {"$ref": "#/components/schemas/Id"}});
        assert_eq!(
            map_schema_type(&ids, &doc),
            Ok(ValueType::array_of(ValueType::Integer))
        );
        let looped = json!({"$ref": "#/components/schemas/Loop"});
        assert!(matches!(
            map_schema_type(&looped, &doc),
            Err(SchemaTypeError::CyclicRef(_))
        ));
    }
}
