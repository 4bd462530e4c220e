use std::fmt;

use serde_json::Value as JsonValue;

/// The kind of value a parameter slot holds, derived from its OpenAPI schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    Text,
    Date,
    Double,
    Integer,
    Boolean,
    Array(Box<ValueType>),
    StructuredObject,
    Null,
}

impl ValueType {
    pub fn array_of(item: ValueType) -> Self {
        ValueType::Array(Box::new(item))
    }

    /// Whether a source producing `supplied` can fill a slot of this type.
    ///
    /// Every primitive renders to text, integers widen to doubles and dates are
    /// carried as strings, so those pairs are compatible in addition to equality.
    pub fn accepts(&self, supplied: &ValueType) -> bool {
        if self == supplied {
            return true;
        }
        match (self, supplied) {
            (
                ValueType::Text,
                ValueType::Date | ValueType::Double | ValueType::Integer | ValueType::Boolean,
            ) => true,
            (ValueType::Date, ValueType::Text) => true,
            (ValueType::Double, ValueType::Integer) => true,
            (ValueType::Array(want), ValueType::Array(have)) => want.accepts(have),
            _ => false,
        }
    }

    /// Best-effort type of a concrete JSON value.
    pub fn of_value(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => ValueType::Null,
            JsonValue::Bool(_) => ValueType::Boolean,
            JsonValue::Number(n) if n.is_i64() || n.is_u64() => ValueType::Integer,
            JsonValue::Number(_) => ValueType::Double,
            JsonValue::String(_) => ValueType::Text,
            JsonValue::Array(items) => {
                let item = items.first().map(ValueType::of_value).unwrap_or(ValueType::Text);
                ValueType::array_of(item)
            }
            JsonValue::Object(_) => ValueType::StructuredObject,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Text => f.write_str("Text"),
            ValueType::Date => f.write_str("Date"),
            ValueType::Double => f.write_str("Double"),
            ValueType::Integer => f.write_str("Integer"),
            ValueType::Boolean => f.write_str("Boolean"),
            ValueType::Array(item) => write!(f, "Array<{item}>"),
            ValueType::StructuredObject => f.write_str("StructuredObject"),
            ValueType::Null => f.write_str("Null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_accepts_primitives_but_not_objects() {
        assert!(ValueType::Text.accepts(&ValueType::Integer));
        assert!(ValueType::Text.accepts(&ValueType::Boolean));
        assert!(!ValueType::Text.accepts(&ValueType::StructuredObject));
    }

    #[test]
    fn integer_does_not_accept_double() {
        assert!(ValueType::Double.accepts(&ValueType::Integer));
        assert!(!ValueType::Integer.accepts(&ValueType::Double));
    }

    #[test]
    fn arrays_compare_items() {
        let want = ValueType::array_of(ValueType::Double);
        assert!(want.accepts(&ValueType::array_of(ValueType::Integer)));
        assert!(!want.accepts(&ValueType::array_of(ValueType::Boolean)));
    }

    #[test]
    fn of_value_infers_nested_arrays() {
        assert_eq!(
            ValueType::of_value(&json!([[1, 2]])),
            ValueType::array_of(ValueType::array_of(ValueType::Integer))
        );
        assert_eq!(ValueType::of_value(&json!(1.5)), ValueType::Double);
        assert_eq!(ValueType::of_value(&json!({"a": 1})), ValueType::StructuredObject);
    }

    #[test]
    fn display_renders_array_items() {
        assert_eq!(ValueType::array_of(ValueType::Date).to_string(), "Array<Date>");
    }
}
