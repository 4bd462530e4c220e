mod common;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use common::{factories, BASE_URL, ORCHESTRATOR};
use openrest_core::{DocumentFormat, ErrorKind, HttpVerb};
use openrest_exec::openapi::{extract_operations, parse_document};
use openrest_exec::{build_factories, ServiceContext};

#[test]
fn one_operation_per_path_and_verb() {
    let names: BTreeSet<String> = factories(ORCHESTRATOR, "Orchestrator")
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    let expected: BTreeSet<String> = [
        "Orchestrator_Bags_Get",
        "Orchestrator_Bags_Post",
        "Orchestrator_api_v_version_Bags_id_Get",
        "Orchestrator_api_v_version_Bags_id_Put",
        "Orchestrator_api_v_version_Bags_id_Patch",
        "Orchestrator_api_v_version_Bags_id_Delete",
        "Orchestrator_Bag_Sequences",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    assert_eq!(names, expected);
}

#[test]
fn metadata_carries_verb_path_and_server() {
    let all = factories(ORCHESTRATOR, "Orchestrator");
    let get = all
        .iter()
        .find(|f| f.name() == "Orchestrator_Bags_Get")
        .unwrap();
    let meta = get.metadata();
    assert_eq!(meta.verb, HttpVerb::Get);
    assert_eq!(meta.path, "/api/v{version}/Bags");
    assert_eq!(meta.server_url, BASE_URL);
    assert_eq!(meta.operation_id.as_deref(), Some("Bags_Get"));
    assert_eq!(get.summary(), Some("Lists bags."));
    assert_eq!(get.category(), "REST");
}

#[test]
fn alias_replaces_generated_name() {
    let spec = r#"
openapi: 3.0.0
info: {title: Foo, version: "1"}
paths:
  /Bar:
    get:
      responses: {"200": {description: ok}}
    put:
      responses: {"200": {description: ok}}
"#;
    let document = Arc::new(parse_document(spec).unwrap());
    let aliases = BTreeMap::from([("Foo_Bar_Get".to_string(), "FooBarV2".to_string())]);
    let service = ServiceContext::new("Foo", BASE_URL).with_aliases(Some(aliases));
    let names: Vec<String> = extract_operations(document, &service)
        .unwrap()
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(names, vec!["FooBarV2", "Foo_Bar_Put"]);
}

#[test]
fn document_without_paths_is_invalid() {
    let document = Arc::new(parse_document("openapi: 3.0.0\ninfo: {title: x, version: '1'}\n").unwrap());
    let err = extract_operations(document, &ServiceContext::new("Svc", BASE_URL)).unwrap_err();
    assert_eq!(err.len(), 1);
    assert!(matches!(err.first().kind, ErrorKind::InvalidSpecification(_)));
}

#[test]
fn parse_diagnostics_are_all_reported() {
    let spec = r#"
openapi: 3.0.0
paths:
  /a:
    get:
      parameters:
        - in: query
        - name: b
          in: body-ish
"#;
    let err = parse_document(spec).unwrap_err();
    assert_eq!(err.len(), 2);
    assert!(err
        .iter()
        .all(|e| matches!(e.kind, ErrorKind::InvalidSpecification(_))));
}

#[test]
fn swagger_documents_use_host_and_base_path() {
    let spec = r#"{
  "swagger": "2.0",
  "info": {"title": "Pets", "version": "1"},
  "host": "pets.example",
  "basePath": "/v2",
  "schemes": ["https"],
  "paths": {
    "/pets/{petId}": {
      "get": {
        "operationId": "getPet",
        "parameters": [{"name": "petId", "in": "path", "required": true, "type": "integer"}],
        "responses": {"200": {"description": "ok"}}
      }
    }
  }
}"#;
    let document = openrest_core::parse_openapi_str(spec, DocumentFormat::Json).unwrap();
    let all = build_factories(Arc::new(document), &ServiceContext::new("Pets", BASE_URL)).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name(), "Pets_getPet");
    assert_eq!(all[0].metadata().server_url, "https://pets.example/v2");
}

#[test]
fn a_bad_operation_fails_the_whole_document() {
    let spec = r#"
openapi: 3.0.0
info: {title: x, version: "1"}
paths:
  /ok:
    get:
      responses: {"200": {description: ok}}
  /bad:
    get:
      parameters:
        - name: amount
          in: query
          schema: {type: number, format: decimal}
      responses: {"200": {description: ok}}
    delete:
      parameters:
        - name: blob
          in: query
          schema: {type: file}
      responses: {"200": {description: ok}}
"#;
    let document = Arc::new(parse_document(spec).unwrap());
    let err = build_factories(document, &ServiceContext::new("Svc", BASE_URL)).unwrap_err();
    assert_eq!(err.len(), 2, "{err}");
}
