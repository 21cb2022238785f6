//! The object-or-array result of a successful call.
//!
//! # Design
//! CloudApp answers with either a JSON object or a JSON array and the caller
//! does not always know which ahead of time. `JsonValue::parse` tries the
//! object shape first and falls back to the array shape; scalars, `null` and
//! non-JSON bodies are rejected.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// A JSON object or a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonValue {
    Object(Map<String, Value>),
    Array(Vec<Value>),
}

impl JsonValue {
    /// Decode `body` as an object, then as an array. When both fail the
    /// object decode error is returned.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<Map<String, Value>>(body) {
            Ok(object) => Ok(JsonValue::Object(object)),
            Err(object_err) => serde_json::from_str::<Vec<Value>>(body)
                .map(JsonValue::Array)
                .map_err(|_| object_err),
        }
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            JsonValue::Object(object) => Some(object),
            JsonValue::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            JsonValue::Array(array) => Some(array),
            JsonValue::Object(_) => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn into_value(self) -> Value {
        self.into()
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(object) => Value::Object(object),
            JsonValue::Array(array) => Value::Array(array),
        }
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Object(object) => write!(f, "{}", Value::Object(object.clone())),
            JsonValue::Array(array) => write!(f, "{}", Value::Array(array.clone())),
        }
    }
}
