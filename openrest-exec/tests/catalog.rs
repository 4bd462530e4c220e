mod common;

use common::{registry, ORCHESTRATOR};
use openrest_core::{ParameterKind, ParameterLocation, ValueType};

fn catalog_names(spec: &str, operation: &str) -> Vec<String> {
    let registry = registry(spec, "Svc");
    let factory = registry.get(operation).expect("operation");
    factory.catalog().names().map(String::from).collect()
}

#[test]
fn required_parameters_come_first_then_security_then_body() {
    let spec = r#"
openapi: 3.0.0
info: {title: x, version: "1"}
components:
  securitySchemes:
    key:
      type: apiKey
      name: X-Api-Key
      in: header
security:
  - key: []
paths:
  /things:
    post:
      operationId: create
      parameters:
        - {name: a, in: query, schema: {type: string}}
        - {name: b, in: query, required: true, schema: {type: string}}
        - {name: c, in: header, schema: {type: string}}
        - {name: d, in: header, required: true, schema: {type: string}}
      requestBody:
        content:
          application/json:
            schema: {type: object}
      responses: {"200": {description: ok}}
"#;
    assert_eq!(
        catalog_names(spec, "Svc_create"),
        vec!["b", "d", "a", "c", "X-Api-Key", "Body"]
    );

    let registry = registry(spec, "Svc");
    let catalog = registry.get("Svc_create").unwrap().catalog();
    let key = catalog.get("X-Api-Key").unwrap();
    assert!(!key.required);
    assert_eq!(key.default_value.as_deref(), Some(""));
    assert_eq!(
        key.kind,
        ParameterKind::Security {
            location: Some(ParameterLocation::Header)
        }
    );
    let body = catalog.get("Body").unwrap();
    assert!(!body.required);
    assert_eq!(body.value_type, ValueType::StructuredObject);
}

#[test]
fn first_entry_wins_a_name_collision() {
    let spec = r#"
openapi: 3.0.0
info: {title: x, version: "1"}
components:
  securitySchemes:
    token:
      type: apiKey
      name: token
      in: query
paths:
  /things:
    get:
      operationId: list
      security:
        - token: []
      parameters:
        - {name: token, in: header, required: true, schema: {type: string}}
      responses: {"200": {description: ok}}
"#;
    let registry = registry(spec, "Svc");
    let catalog = registry.get("Svc_list").unwrap().catalog();
    assert_eq!(catalog.len(), 1);
    let token = catalog.get("token").unwrap();
    assert_eq!(token.kind, ParameterKind::Named { location: ParameterLocation::Header });
    assert!(token.required);
}

#[test]
fn path_item_parameters_merge_and_path_is_always_required() {
    let spec = r#"
openapi: 3.0.0
info: {title: x, version: "1"}
paths:
  /items/{id}:
    parameters:
      - {name: id, in: path, schema: {type: integer}}
      - {name: verbose, in: query, schema: {type: boolean}}
    get:
      operationId: read
      parameters:
        - {name: verbose, in: query, required: true, schema: {type: string}}
      responses: {"200": {description: ok}}
"#;
    let registry = registry(spec, "Svc");
    let catalog = registry.get("Svc_read").unwrap().catalog();
    let id = catalog.get("id").unwrap();
    assert!(id.required);
    assert_eq!(id.value_type, ValueType::Integer);
    let verbose = catalog.get("verbose").unwrap();
    assert!(verbose.required);
    assert_eq!(verbose.value_type, ValueType::Text);
}

#[test]
fn references_are_resolved() {
    let spec = r#"
openapi: 3.0.0
info: {title: x, version: "1"}
components:
  schemas:
    Ids:
      type: array
      items: {type: integer}
  parameters:
    Ids:
      name: ids
      in: query
      required: true
      schema: {$ref: '#/components/schemas/Ids'}
  requestBodies:
    Payload:
      required: true
      content:
        application/json:
          schema: {type: object}
paths:
  /batch:
    post:
      operationId: batch
      parameters:
        - $ref: '#/components/parameters/Ids'
      requestBody:
        $ref: '#/components/requestBodies/Payload'
      responses: {"200": {description: ok}}
"#;
    let registry = registry(spec, "Svc");
    let catalog = registry.get("Svc_batch").unwrap().catalog();
    assert_eq!(
        catalog.get("ids").unwrap().value_type,
        ValueType::array_of(ValueType::Integer)
    );
    assert!(catalog.get("Body").unwrap().required);
}

#[test]
fn schema_defaults_and_types() {
    let registry = registry(ORCHESTRATOR, "Orchestrator");
    let catalog = registry.get("Orchestrator_Bags_Get").unwrap().catalog();
    assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["version", "Name", "Custodian"]);
    assert_eq!(catalog.get("version").unwrap().default_value.as_deref(), Some("1"));

    let by_id = registry
        .get("Orchestrator_api_v_version_Bags_id_Get")
        .unwrap()
        .catalog();
    assert_eq!(by_id.get("id").unwrap().value_type, ValueType::Integer);
}

#[test]
fn http_schemes_map_to_authorization_and_unlocated_schemes_to_cookies() {
    let spec = r#"
openapi: 3.0.0
info: {title: x, version: "1"}
components:
  securitySchemes:
    bearer: {type: http, scheme: bearer}
    session: {type: apiKey, name: sid}
paths:
  /me:
    get:
      operationId: me
      security:
        - bearer: []
          session: []
      responses: {"200": {description: ok}}
"#;
    let registry = registry(spec, "Svc");
    let catalog = registry.get("Svc_me").unwrap().catalog();
    assert_eq!(
        catalog.get("Authorization").unwrap().location(),
        Some(ParameterLocation::Header)
    );
    assert_eq!(catalog.get("sid").unwrap().location(), None);
}

#[test]
fn swagger_body_and_form_parameters() {
    let spec = r#"
swagger: "2.0"
info: {title: x, version: "1"}
securityDefinitions:
  key: {type: apiKey, name: api_key, in: query}
paths:
  /pets:
    post:
      operationId: addPet
      security:
        - key: []
      parameters:
        - {name: pet, in: body, required: true, schema: {type: object}}
        - {name: photo, in: formData, type: file}
        - {name: dryRun, in: query, type: boolean, default: false}
      responses: {"200": {description: ok}}
"#;
    let registry = registry(spec, "Pets");
    let catalog = registry.get("Pets_addPet").unwrap().catalog();
    assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["dryRun", "api_key", "Body"]);
    let dry_run = catalog.get("dryRun").unwrap();
    assert_eq!(dry_run.value_type, ValueType::Boolean);
    assert_eq!(dry_run.default_value.as_deref(), Some("false"));
    assert!(catalog.get("Body").unwrap().required);
}
