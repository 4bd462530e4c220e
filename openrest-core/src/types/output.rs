use std::fmt;

use serde_json::{Map, Value as JsonValue};

/// What a successful call hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultShape {
    StructuredObject,
    NoValue,
    Text,
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultShape::StructuredObject => f.write_str("StructuredObject"),
            ResultShape::NoValue => f.write_str("NoValue"),
            ResultShape::Text => f.write_str("Text"),
        }
    }
}

/// The result a call site is prepared to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpectedOutput {
    #[default]
    Any,
    Exactly(ResultShape),
}

impl ExpectedOutput {
    pub fn allows(&self, shape: ResultShape) -> bool {
        match self {
            ExpectedOutput::Any => true,
            ExpectedOutput::Exactly(want) => *want == shape,
        }
    }
}

impl fmt::Display for ExpectedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedOutput::Any => f.write_str("Any"),
            ExpectedOutput::Exactly(shape) => write!(f, "{shape}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum StepOutput {
    Structured(Map<String, JsonValue>),
    NoValue,
    Text(String),
}

impl StepOutput {
    pub fn shape(&self) -> ResultShape {
        match self {
            StepOutput::Structured(_) => ResultShape::StructuredObject,
            StepOutput::NoValue => ResultShape::NoValue,
            StepOutput::Text(_) => ResultShape::Text,
        }
    }

    pub fn as_structured(&self) -> Option<&Map<String, JsonValue>> {
        match self {
            StepOutput::Structured(map) => Some(map),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            StepOutput::Structured(map) => JsonValue::Object(map.clone()),
            StepOutput::NoValue => JsonValue::Null,
            StepOutput::Text(s) => JsonValue::String(s.clone()),
        }
    }
}
