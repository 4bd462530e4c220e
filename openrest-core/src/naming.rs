//! Operation naming: `{service}_{operationId}` or `{service}_{path}_{Verb}`, sanitised, then aliased.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::HttpVerb;

static NON_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{Nd}]+").expect("valid regex"));

/// Collapses every run of non-alphanumeric characters into one `_` and trims `_` from both ends.
pub fn sanitize_name(raw: &str) -> String {
    NON_ALNUM_RUN
        .replace_all(raw, "_")
        .trim_matches('_')
        .to_string()
}

pub fn generated_name(
    service_name: &str,
    operation_id: Option<&str>,
    path: &str,
    verb: HttpVerb,
) -> String {
    let base = match operation_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => format!("{service_name}_{id}"),
        None => format!("{service_name}_{path}_{}", verb.display_name()),
    };
    sanitize_name(&base)
}

pub fn apply_alias(name: String, aliases: Option<&BTreeMap<String, String>>) -> String {
    match aliases.and_then(|a| a.get(&name)) {
        Some(alias) => alias.clone(),
        None => name,
    }
}
