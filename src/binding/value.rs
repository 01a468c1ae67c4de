//! Resolved values
//!
//! The read-only result of applying a schema field to a target. Nested
//! mappings always become [`ValueObject`]s, never raw JSON objects, so
//! consumers can use the same dotted access whether a value came from a
//! default or from a live object.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Effective value of one schema field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    /// No value was found and the field has no default
    Absent,
    /// Non-mapping value (string, number, bool, array)
    Scalar(Value),
    /// Struct-like value with named sub-values
    Object(ValueObject),
}

impl ResolvedValue {
    /// Wrap a canonical JSON value, turning mappings into value objects
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => ResolvedValue::Absent,
            Value::Object(map) => ResolvedValue::Object(ValueObject::from_map(map)),
            other => ResolvedValue::Scalar(other),
        }
    }

    /// Whether no value is present
    pub fn is_absent(&self) -> bool {
        matches!(self, ResolvedValue::Absent)
    }

    /// The scalar value, if this is one
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            ResolvedValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// The value object, if this is one
    pub fn as_object(&self) -> Option<&ValueObject> {
        match self {
            ResolvedValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Attribute access on object values
    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        self.as_object().and_then(|obj| obj.get(name))
    }

    /// Dotted access, e.g. `"source.id"`
    pub fn path(&self, dotted: &str) -> Option<&ResolvedValue> {
        dotted
            .split('.')
            .try_fold(self, |value, name| value.get(name))
    }

    /// Plain JSON view (absent becomes null)
    pub fn to_json(&self) -> Value {
        match self {
            ResolvedValue::Absent => Value::Null,
            ResolvedValue::Scalar(v) => v.clone(),
            ResolvedValue::Object(obj) => obj.to_json(),
        }
    }
}

/// Immutable, attribute-accessible snapshot of a struct-like value
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ValueObject {
    fields: BTreeMap<String, ResolvedValue>,
}

impl ValueObject {
    /// Build from already-resolved sub-values
    pub fn new(fields: impl IntoIterator<Item = (String, ResolvedValue)>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Build from a JSON mapping, wrapping nested mappings recursively
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self::new(
            map.into_iter()
                .map(|(k, v)| (k, ResolvedValue::from_value(v))),
        )
    }

    /// Sub-value by name
    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        self.fields.get(name)
    }

    /// Names of all sub-values, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Plain JSON view
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl fmt::Display for ValueObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueObject(")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}={}", name, value.to_json())?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_mappings_become_objects() {
        let value = ResolvedValue::from_value(json!({
            "name": "Wind",
            "source": {"id": "w1", "position": {"lat": 1.0}}
        }));

        let source = value.get("source").unwrap();
        assert!(source.as_object().is_some());
        assert_eq!(
            value.path("source.position.lat").and_then(|v| v.as_scalar()),
            Some(&json!(1.0))
        );
    }

    #[test]
    fn test_path_through_scalar_is_none() {
        let value = ResolvedValue::from_value(json!({"name": "Wind"}));
        assert!(value.path("name.first").is_none());
    }

    #[test]
    fn test_serializes_like_plain_json() {
        let value = ResolvedValue::Object(ValueObject::new(vec![
            ("a".to_string(), ResolvedValue::Absent),
            ("b".to_string(), ResolvedValue::Scalar(json!(2))),
        ]));

        assert_eq!(serde_json::to_value(&value).unwrap(), json!({"a": null, "b": 2}));
        assert_eq!(value.to_json(), json!({"a": null, "b": 2}));
    }

    #[test]
    fn test_display() {
        let obj = ValueObject::from_map(
            json!({"lat": 1, "lon": 2}).as_object().unwrap().clone(),
        );
        assert_eq!(obj.to_string(), "ValueObject(lat=1,lon=2)");
    }
}
