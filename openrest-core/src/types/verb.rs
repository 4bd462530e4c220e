use std::fmt;

use super::ResultShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpVerb {
    /// Path-item keys in the order operations are visited.
    pub const ALL: [HttpVerb; 8] = [
        HttpVerb::Get,
        HttpVerb::Put,
        HttpVerb::Post,
        HttpVerb::Delete,
        HttpVerb::Options,
        HttpVerb::Head,
        HttpVerb::Patch,
        HttpVerb::Trace,
    ];

    /// Lower-case path-item key (`get`, `post`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Put => "put",
            HttpVerb::Post => "post",
            HttpVerb::Delete => "delete",
            HttpVerb::Options => "options",
            HttpVerb::Head => "head",
            HttpVerb::Patch => "patch",
            HttpVerb::Trace => "trace",
        }
    }

    /// Capitalised form used when building operation names (`Get`, `Post`, ...).
    pub fn display_name(&self) -> &'static str {
        match self {
            HttpVerb::Get => "Get",
            HttpVerb::Put => "Put",
            HttpVerb::Post => "Post",
            HttpVerb::Delete => "Delete",
            HttpVerb::Options => "Options",
            HttpVerb::Head => "Head",
            HttpVerb::Patch => "Patch",
            HttpVerb::Trace => "Trace",
        }
    }

    pub fn as_method(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Put => "PUT",
            HttpVerb::Post => "POST",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Options => "OPTIONS",
            HttpVerb::Head => "HEAD",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Trace => "TRACE",
        }
    }

    /// Declared result of a generated operation, `None` if the verb is unsupported.
    pub fn result_shape(&self) -> Option<ResultShape> {
        match self {
            HttpVerb::Get | HttpVerb::Post => Some(ResultShape::StructuredObject),
            HttpVerb::Put | HttpVerb::Delete | HttpVerb::Patch => Some(ResultShape::NoValue),
            HttpVerb::Options | HttpVerb::Head | HttpVerb::Trace => None,
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
