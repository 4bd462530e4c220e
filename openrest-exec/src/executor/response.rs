use openrest_core::{ErrorKind, ResultShape, StepOutput};
use serde_json::Value as JsonValue;

/// Turns a successful response body into the call's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultConverter {
    /// Decode a JSON object.
    Structured,
    Discard,
    Text,
}

const JSON_OBJECT: &str = "JSON object";

impl ResultConverter {
    pub fn for_shape(shape: ResultShape) -> Self {
        match shape {
            ResultShape::StructuredObject => ResultConverter::Structured,
            ResultShape::NoValue => ResultConverter::Discard,
            ResultShape::Text => ResultConverter::Text,
        }
    }

    pub fn shape(&self) -> ResultShape {
        match self {
            ResultConverter::Structured => ResultShape::StructuredObject,
            ResultConverter::Discard => ResultShape::NoValue,
            ResultConverter::Text => ResultShape::Text,
        }
    }

    pub fn convert(&self, body: &[u8]) -> Result<StepOutput, ErrorKind> {
        match self {
            ResultConverter::Discard => Ok(StepOutput::NoValue),
            ResultConverter::Text => Ok(StepOutput::Text(body_text(body))),
            ResultConverter::Structured => {
                let text = body_text(body);
                let not_an_object = || ErrorKind::CouldNotParse {
                    text: text.clone(),
                    format: JSON_OBJECT.to_string(),
                };
                match serde_json::from_str::<JsonValue>(text.trim()) {
                    Ok(JsonValue::Object(map)) => Ok(StepOutput::Structured(map)),
                    Ok(_) | Err(_) => Err(not_an_object()),
                }
            }
        }
    }
}

/// Lossy UTF-8 with any byte-order mark removed.
pub fn body_text(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}
