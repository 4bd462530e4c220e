use openrest_core::{OpenApiDocument, SpecVersion};
use serde_json::Value as JsonValue;

/// Picks the URL requests for one operation are sent to.
///
/// OpenAPI 3 looks at operation, path-item and document `servers` in that order; Swagger 2
/// builds it from `schemes`, `host` and `basePath`. Relative results are joined onto
/// `base_url`, and with no server information at all `base_url` is used as is.
pub(crate) fn select_server_url(
    document: &OpenApiDocument,
    path_item: &JsonValue,
    operation: &JsonValue,
    base_url: &str,
) -> String {
    let declared = match document.version {
        SpecVersion::OpenApi3 => first_server_url(operation)
            .or_else(|| first_server_url(path_item))
            .or_else(|| first_server_url(&document.raw)),
        SpecVersion::Swagger2 => swagger_server_url(&document.raw),
    };
    match declared {
        Some(url) => join_server_url(base_url, &url),
        None => base_url.to_string(),
    }
}

fn first_server_url(node: &JsonValue) -> Option<String> {
    let server = node.get("servers")?.as_array()?.first()?;
    let url = server.get("url")?.as_str()?;
    Some(substitute_variables(url, server.get("variables")))
}

fn substitute_variables(url: &str, variables: Option<&JsonValue>) -> String {
    let Some(variables) = variables.and_then(|v| v.as_object()) else {
        return url.to_string();
    };
    let mut out = url.to_string();
    for (name, variable) in variables {
        if let Some(default) = variable.get("default").and_then(|d| d.as_str()) {
            out = out.replace(&format!("{{{name}}}"), default);
        }
    }
    out
}

fn swagger_server_url(raw: &JsonValue) -> Option<String> {
    let base_path = raw.get("basePath").and_then(|v| v.as_str()).unwrap_or("");
    match raw.get("host").and_then(|v| v.as_str()) {
        Some(host) => {
            let scheme = raw
                .get("schemes")
                .and_then(|s| s.as_array())
                .and_then(|s| s.first())
                .and_then(|s| s.as_str())
                .unwrap_or("https");
            Some(format!("{scheme}://{host}{base_path}"))
        }
        None if !base_path.is_empty() => Some(base_path.to_string()),
        None => None,
    }
}

fn join_server_url(base_url: &str, server: &str) -> String {
    if url::Url::parse(server).is_ok() || base_url.is_empty() {
        return server.to_string();
    }
    let server = server.trim_start_matches('/');
    if server.is_empty() {
        return base_url.to_string();
    }
    format!("{}/{server}", base_url.trim_end_matches('/'))
}
