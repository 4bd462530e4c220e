use openrest_core::{parse_openapi_str, DocumentFormat, SpecVersion};

#[test]
fn parses_openapi3_yaml() {
    let yaml = r#"
openapi: 3.0.1
info: { title: Pets, version: 1.0.0 }
paths:
  /pets:
    get:
      operationId: listPets
      responses: { "200": { description: ok } }
"#;
    let doc = parse_openapi_str(yaml, DocumentFormat::Auto).unwrap();
    assert_eq!(doc.version, SpecVersion::OpenApi3);
    assert_eq!(doc.format, DocumentFormat::Yaml);
    assert_eq!(doc.title(), Some("Pets"));
    assert!(doc.paths().unwrap().contains_key("/pets"));
}

#[test]
fn parses_swagger2_json() {
    let json = r#"{"swagger":"2.0","info":{"title":"T","version":"1"},"paths":{}}"#;
    let doc = parse_openapi_str(json, DocumentFormat::Json).unwrap();
    assert_eq!(doc.version, SpecVersion::Swagger2);
}

#[test]
fn reports_every_structural_problem() {
    let yaml = r#"
openapi: 3.0.0
paths:
  /a:
    get:
      parameters:
        - in: query
        - name: x
          in: somewhere
  /b: 12
"#;
    let diags = parse_openapi_str(yaml, DocumentFormat::Yaml).unwrap_err();
    assert_eq!(diags.len(), 3, "got {diags:?}");
    assert!(diags.iter().any(|d| d.message.contains("missing 'name'")));
    assert!(diags.iter().any(|d| d.message.contains("unknown parameter location 'somewhere'")));
    assert!(diags.iter().any(|d| d.pointer == "/paths/~1b"));
}

#[test]
fn missing_version_is_a_diagnostic() {
    let diags = parse_openapi_str("paths: {}", DocumentFormat::Auto).unwrap_err();
    assert_eq!(diags.len(), 1);
    assert!(diags[0].message.contains("version"));
}

#[test]
fn unparsable_text_yields_single_diagnostic() {
    let diags = parse_openapi_str("{ not json", DocumentFormat::Auto).unwrap_err();
    assert_eq!(diags.len(), 1);
    assert!(diags[0].message.contains("JSON"));
}
