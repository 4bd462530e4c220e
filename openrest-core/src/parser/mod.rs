use std::fmt;

use serde_json::{Map, Value as JsonValue};

use crate::schema::RefLookup;
use crate::types::HttpVerb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecVersion {
    /// Swagger 2.0
    Swagger2,
    /// OpenAPI 3.x
    OpenApi3,
}

/// A problem found while parsing, addressed by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub pointer: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(pointer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pointer.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.pointer, self.message)
        }
    }
}

/// Parsed OpenAPI 2.0/3.x document; navigated as JSON regardless of input format.
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    pub version: SpecVersion,
    pub format: DocumentFormat,
    pub raw: JsonValue,
}

impl OpenApiDocument {
    pub fn paths(&self) -> Option<&Map<String, JsonValue>> {
        self.raw.get("paths")?.as_object()
    }

    pub fn title(&self) -> Option<&str> {
        self.raw.get("info")?.get("title")?.as_str()
    }

    /// Security schemes keyed by name (`components.securitySchemes` or `securityDefinitions`).
    pub fn security_schemes(&self) -> Option<&Map<String, JsonValue>> {
        let schemes = match self.version {
            SpecVersion::OpenApi3 => self.raw.get("components")?.get("securitySchemes")?,
            SpecVersion::Swagger2 => self.raw.get("securityDefinitions")?,
        };
        schemes.as_object()
    }
}

impl RefLookup for OpenApiDocument {
    fn lookup(&self, reference: &str) -> Option<&JsonValue> {
        self.raw.lookup(reference)
    }
}

/// Parses specification text and checks the structure the extractor relies on.
///
/// All structural problems are reported together rather than stopping at the first.
pub fn parse_openapi_str(
    input: &str,
    format: DocumentFormat,
) -> Result<OpenApiDocument, Vec<Diagnostic>> {
    let (raw, format) = parse_value(input, format).map_err(|m| vec![Diagnostic::new("", m)])?;

    let mut diagnostics = Vec::new();
    let Some(root) = raw.as_object() else {
        return Err(vec![Diagnostic::new("", "document root must be an object")]);
    };

    let version = match (root.get("openapi"), root.get("swagger")) {
        (Some(JsonValue::String(v)), _) if v.starts_with("3.") => Some(SpecVersion::OpenApi3),
        (_, Some(JsonValue::String(v))) if v == "2.0" => Some(SpecVersion::Swagger2),
        (Some(v), _) => {
            diagnostics.push(Diagnostic::new("/openapi", format!("unsupported OpenAPI version {v}")));
            None
        }
        (_, Some(v)) => {
            diagnostics.push(Diagnostic::new("/swagger", format!("unsupported Swagger version {v}")));
            None
        }
        (None, None) => {
            diagnostics.push(Diagnostic::new("", "missing 'openapi' or 'swagger' version field"));
            None
        }
    };

    match root.get("paths") {
        None => {}
        Some(JsonValue::Object(paths)) => {
            for (path, item) in paths {
                check_path_item(path, item, &mut diagnostics);
            }
        }
        Some(_) => diagnostics.push(Diagnostic::new("/paths", "'paths' must be an object")),
    }

    match version {
        Some(version) if diagnostics.is_empty() => Ok(OpenApiDocument {
            version,
            format,
            raw,
        }),
        _ => Err(diagnostics),
    }
}

fn parse_value(input: &str, format: DocumentFormat) -> Result<(JsonValue, DocumentFormat), String> {
    match format {
        DocumentFormat::Json => serde_json::from_str::<JsonValue>(input)
            .map(|v| (v, DocumentFormat::Json))
            .map_err(|e| format!("failed to parse as JSON: {e}")),
        DocumentFormat::Yaml => {
            let y = serde_yaml::from_str::<serde_yaml::Value>(input)
                .map_err(|e| format!("failed to parse as YAML: {e}"))?;
            let v = serde_json::to_value(y).map_err(|e| format!("failed to convert YAML: {e}"))?;
            Ok((v, DocumentFormat::Yaml))
        }
        DocumentFormat::Auto => {
            // JSON always starts with `{` after trimming; everything else goes through YAML.
            if input.trim_start().starts_with('{') {
                parse_value(input, DocumentFormat::Json)
            } else {
                parse_value(input, DocumentFormat::Yaml)
            }
        }
    }
}

fn check_path_item(path: &str, item: &JsonValue, diagnostics: &mut Vec<Diagnostic>) {
    let base = format!("/paths/{}", encode_pointer_token(path));
    let Some(item) = item.as_object() else {
        diagnostics.push(Diagnostic::new(base, "path item must be an object"));
        return;
    };
    if let Some(params) = item.get("parameters") {
        check_parameters(&format!("{base}/parameters"), params, diagnostics);
    }
    for verb in HttpVerb::ALL {
        let Some(op) = item.get(verb.key()) else {
            continue;
        };
        let op_ptr = format!("{base}/{}", verb.key());
        let Some(op) = op.as_object() else {
            diagnostics.push(Diagnostic::new(op_ptr, "operation must be an object"));
            continue;
        };
        if let Some(params) = op.get("parameters") {
            check_parameters(&format!("{op_ptr}/parameters"), params, diagnostics);
        }
        if let Some(id) = op.get("operationId") {
            if !id.is_string() {
                diagnostics.push(Diagnostic::new(
                    format!("{op_ptr}/operationId"),
                    "operationId must be a string",
                ));
            }
        }
    }
}

fn check_parameters(pointer: &str, params: &JsonValue, diagnostics: &mut Vec<Diagnostic>) {
    let Some(arr) = params.as_array() else {
        diagnostics.push(Diagnostic::new(pointer, "parameters must be an array"));
        return;
    };
    for (i, p) in arr.iter().enumerate() {
        let ptr = format!("{pointer}/{i}");
        if p.get("$ref").is_some() {
            continue;
        }
        if p.get("name").and_then(|v| v.as_str()).is_none() {
            diagnostics.push(Diagnostic::new(&ptr, "parameter is missing 'name'"));
        }
        match p.get("in").and_then(|v| v.as_str()) {
            Some("query" | "header" | "path" | "cookie" | "body" | "formData") => {}
            Some(other) => diagnostics.push(Diagnostic::new(
                &ptr,
                format!("unknown parameter location '{other}'"),
            )),
            None => diagnostics.push(Diagnostic::new(&ptr, "parameter is missing 'in'")),
        }
    }
}

pub fn encode_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_slashes_in_path_keys() {
        assert_eq!(encode_pointer_token("/pets/{id}"), "~1pets~1{id}");
        assert_eq!(encode_pointer_token("a~b"), "a~0b");
    }

    #[test]
    fn json_input_is_detected() {
        let doc = parse_openapi_str(r#"{"openapi":"3.0.0","paths":{}}"#, DocumentFormat::Auto)
            .unwrap();
        assert_eq!(doc.format, DocumentFormat::Json);
        assert_eq!(doc.version, SpecVersion::OpenApi3);
    }
}
