//! Type tags for profiled values
//!
//! Every observed value is reduced to a [`TypeTag`]. Arrays are tagged by
//! their first element only, so `[{"a": 1}, "x"]` is `list(object)`.

use serde_json::Value;
use std::fmt;

/// Semantic type of a JSON value as it appears in a report
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Null,
    Boolean,
    Number,
    String,
    Object,
    /// Array tagged by its first element; `None` for an empty array
    List(Option<Box<TypeTag>>),
}

impl TypeTag {
    /// Classify a value. Only the first element of an array is inspected.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Number(_) => TypeTag::Number,
            Value::String(_) => TypeTag::String,
            Value::Object(_) => TypeTag::Object,
            Value::Array(items) => {
                TypeTag::List(items.first().map(|first| Box::new(TypeTag::of(first))))
            }
        }
    }

    fn primitive_name(&self) -> Option<&'static str> {
        match self {
            TypeTag::Null => Some("null"),
            TypeTag::Boolean => Some("boolean"),
            TypeTag::Number => Some("number"),
            TypeTag::String => Some("string"),
            TypeTag::Object => Some("object"),
            TypeTag::List(_) => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::List(None) => f.write_str("list(empty)"),
            TypeTag::List(Some(inner)) => write!(f, "list({})", inner),
            other => f.write_str(other.primitive_name().unwrap_or_default()),
        }
    }
}

/// Shorthand for `TypeTag::of(value).to_string()`
pub fn classify(value: &Value) -> String {
    TypeTag::of(value).to_string()
}
