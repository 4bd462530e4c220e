use openrest_core::{HttpVerb, ParameterLocation};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParameter {
    pub name: String,
    pub value: String,
    pub location: ParameterLocation,
}

/// A request before it is bound to a server: method, resource path template,
/// located parameters and an optional JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub method: HttpVerb,
    pub resource: String,
    pub parameters: Vec<RequestParameter>,
    pub body: Option<JsonValue>,
}

impl RestRequest {
    pub fn new(method: HttpVerb, resource: impl Into<String>) -> Self {
        Self {
            method,
            resource: resource.into(),
            parameters: Vec::new(),
            body: None,
        }
    }

    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        location: ParameterLocation,
    ) {
        self.parameters.push(RequestParameter {
            name: name.into(),
            value: value.into(),
            location,
        });
    }

    pub fn set_json_body(&mut self, body: JsonValue) {
        self.body = Some(body);
    }

    /// Located parameters plus the body, if any.
    pub fn parameter_count(&self) -> usize {
        self.parameters.len() + usize::from(self.body.is_some())
    }

    pub fn parameters_at(&self, location: ParameterLocation) -> impl Iterator<Item = &RequestParameter> {
        self.parameters.iter().filter(move |p| p.location == location)
    }

    /// Header parameters, then a single `Cookie` header joining all cookie parameters.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers: Vec<(String, String)> = self
            .parameters_at(ParameterLocation::Header)
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect();
        let cookies: Vec<String> = self
            .parameters_at(ParameterLocation::Cookie)
            .map(|p| format!("{}={}", p.name, p.value))
            .collect();
        if !cookies.is_empty() {
            headers.push(("Cookie".to_string(), cookies.join("; ")));
        }
        headers
    }

    /// Resolves the full URL: `base_url` joined with the resource, path placeholders
    /// substituted and query parameters appended.
    pub fn url(&self, base_url: &str) -> Result<url::Url, String> {
        if base_url.is_empty() {
            return Err("missing server base URL".to_string());
        }
        let mut resource = self.resource.clone();
        for p in self.parameters_at(ParameterLocation::Path) {
            resource = resource.replace(&format!("{{{}}}", p.name), &urlencoding::encode(&p.value));
        }
        let joined = match resource.trim_start_matches('/') {
            "" => base_url.to_string(),
            rest => format!("{}/{rest}", base_url.trim_end_matches('/')),
        };
        let mut url = url::Url::parse(&joined).map_err(|e| format!("invalid URL '{joined}': {e}"))?;
        let mut query = self.parameters_at(ParameterLocation::Query).peekable();
        if query.peek().is_some() {
            let mut pairs = url.query_pairs_mut();
            for p in query {
                pairs.append_pair(&p.name, &p.value);
            }
        }
        Ok(url)
    }
}

/// Textual form of a value as it goes into a header, query string or path segment.
pub fn primitive_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        JsonValue::Array(items) => items.iter().map(primitive_text).collect::<Vec<_>>().join(","),
        JsonValue::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_substitutes_path_and_appends_query() {
        let mut req = RestRequest::new(HttpVerb::Get, "/api/v{version}/Bags/{id}");
        req.add_parameter("version", "1", ParameterLocation::Path);
        req.add_parameter("id", "a b", ParameterLocation::Path);
        req.add_parameter("Name", "x&y", ParameterLocation::Query);
        let url = req.url("http://host/root/").unwrap();
        assert_eq!(url.as_str(), "http://host/root/api/v1/Bags/a%20b?Name=x%26y");
    }

    #[test]
    fn cookies_share_one_header() {
        let mut req = RestRequest::new(HttpVerb::Get, "/");
        req.add_parameter("a", "1", ParameterLocation::Cookie);
        req.add_parameter("X-Key", "k", ParameterLocation::Header);
        req.add_parameter("b", "2", ParameterLocation::Cookie);
        assert_eq!(
            req.headers(),
            vec![
                ("X-Key".to_string(), "k".to_string()),
                ("Cookie".to_string(), "a=1; b=2".to_string())
            ]
        );
    }

    #[test]
    fn body_counts_as_a_parameter() {
        let mut req = RestRequest::new(HttpVerb::Post, "/things");
        req.add_parameter("q", "1", ParameterLocation::Query);
        assert_eq!(req.parameter_count(), 1);
        req.set_json_body(json!({"a": 1}));
        assert_eq!(req.parameter_count(), 2);
    }

    #[test]
    fn primitive_text_renders_scalars_plainly() {
        assert_eq!(primitive_text(&json!("s")), "s");
        assert_eq!(primitive_text(&json!(1.5)), "1.5");
        assert_eq!(primitive_text(&json!(true)), "true");
        assert_eq!(primitive_text(&json!(null)), "");
        assert_eq!(primitive_text(&json!([1, "a"])), "1,a");
    }
}
