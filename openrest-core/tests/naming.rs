use std::collections::BTreeMap;

use openrest_core::{apply_alias, generated_name, sanitize_name, HttpVerb};

#[test]
fn operation_id_names_are_prefixed_with_service() {
    assert_eq!(
        generated_name("Orchestrator", Some("Bags_Get"), "/Bags", HttpVerb::Get),
        "Orchestrator_Bags_Get"
    );
}

#[test]
fn path_names_include_capitalised_verb() {
    assert_eq!(
        generated_name("Orchestrator", None, "/api/v{version}/Bags/{id}", HttpVerb::Get),
        "Orchestrator_api_v_version_Bags_id_Get"
    );
    assert_eq!(
        generated_name("Orchestrator", None, "/api/v{version}/Bags/{id}", HttpVerb::Delete),
        "Orchestrator_api_v_version_Bags_id_Delete"
    );
}

#[test]
fn service_names_are_sanitised_too() {
    assert_eq!(
        generated_name("My Service!", Some("list.users"), "/users", HttpVerb::Get),
        "My_Service_list_users"
    );
}

#[test]
fn alias_replaces_generated_name() {
    let aliases: BTreeMap<String, String> =
        [("Foo_Bar_Get".to_string(), "FooBarV2".to_string())].into();
    let name = generated_name("Foo", None, "/Bar", HttpVerb::Get);
    assert_eq!(name, "Foo_Bar_Get");
    assert_eq!(apply_alias(name, Some(&aliases)), "FooBarV2");
}

#[test]
fn sanitising_is_idempotent() {
    let once = sanitize_name("--a//b__c--");
    assert_eq!(sanitize_name(&once), once);
}
