use std::fmt;

use super::ValueType;

/// Name under which a request payload is supplied.
pub const BODY_PARAMETER_NAME: &str = "Body";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl ParameterLocation {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "path" => Some(ParameterLocation::Path),
            "cookie" => Some(ParameterLocation::Cookie),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ParameterKind {
    Named { location: ParameterLocation },
    Security { location: Option<ParameterLocation> },
    Body,
}

/// One slot of an operation's parameter catalog.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub name: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub value_type: ValueType,
    #[serde(flatten)]
    pub kind: ParameterKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterSpec {
    pub fn named(
        name: impl Into<String>,
        location: ParameterLocation,
        required: bool,
        default_value: Option<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            name: name.into(),
            required,
            default_value,
            value_type,
            kind: ParameterKind::Named { location },
            description: None,
        }
    }

    /// Security parameters are never required and default to the empty string.
    pub fn security(name: impl Into<String>, location: Option<ParameterLocation>) -> Self {
        Self {
            name: name.into(),
            required: false,
            default_value: Some(String::new()),
            value_type: ValueType::Text,
            kind: ParameterKind::Security { location },
            description: None,
        }
    }

    pub fn body(required: bool) -> Self {
        Self {
            name: BODY_PARAMETER_NAME.to_string(),
            required,
            default_value: None,
            value_type: ValueType::StructuredObject,
            kind: ParameterKind::Body,
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn is_body(&self) -> bool {
        matches!(self.kind, ParameterKind::Body)
    }

    /// Where the value is attached on the request; `None` for the body and for
    /// security schemes that declare no location.
    pub fn location(&self) -> Option<ParameterLocation> {
        match &self.kind {
            ParameterKind::Named { location } => Some(*location),
            ParameterKind::Security { location } => *location,
            ParameterKind::Body => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ParameterKind::Named { .. } => "named",
            ParameterKind::Security { .. } => "security",
            ParameterKind::Body => "body",
        }
    }
}
