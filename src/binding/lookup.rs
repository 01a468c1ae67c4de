//! Value lookup on bind targets
//!
//! A target is either an object whose values are read as attributes, or a
//! plain key/value mapping. Both answer the same question: "what raw value,
//! if any, is stored under this name?"

use serde_json::{Map, Value};

/// Same-named lookup shared by both target shapes
pub trait Lookup {
    /// Raw value stored under `name`; `None` when absent or null
    fn lookup(&self, name: &str) -> Option<Value>;
}

/// Objects that expose named attributes to form binding
pub trait Attributes {
    /// Snapshot of the attribute called `name`
    fn attribute(&self, name: &str) -> Option<Value>;
}

/// A bind target
#[derive(Clone, Copy)]
pub enum Target<'a> {
    /// Look values up as attributes of a live object
    ByAttribute(&'a dyn Attributes),
    /// Look values up as keys of a mapping
    ByKey(&'a Map<String, Value>),
}

impl<'a> Target<'a> {
    /// Target an object's attributes
    pub fn attributes(object: &'a dyn Attributes) -> Self {
        Target::ByAttribute(object)
    }

    /// Target a mapping's keys
    pub fn keys(map: &'a Map<String, Value>) -> Self {
        Target::ByKey(map)
    }

    /// Target a JSON value; only objects have named values
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Target::ByKey)
    }
}

impl Lookup for Target<'_> {
    fn lookup(&self, name: &str) -> Option<Value> {
        let value = match self {
            Target::ByAttribute(object) => object.attribute(name),
            Target::ByKey(map) => map.get(name).cloned(),
        };
        value.filter(|v| !v.is_null())
    }
}

impl<'a> From<&'a Map<String, Value>> for Target<'a> {
    fn from(map: &'a Map<String, Value>) -> Self {
        Target::ByKey(map)
    }
}

impl std::fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::ByAttribute(_) => f.write_str("Target::ByAttribute(..)"),
            Target::ByKey(map) => f.debug_tuple("Target::ByKey").field(map).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Spill {
        name: String,
        amount: f64,
    }

    impl Attributes for Spill {
        fn attribute(&self, name: &str) -> Option<Value> {
            match name {
                "name" => Some(json!(self.name)),
                "amount" => Some(json!(self.amount)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_attribute_and_key_lookup_agree() {
        let spill = Spill {
            name: "Spill #1".into(),
            amount: 1000.0,
        };
        let map = json!({"name": "Spill #1", "amount": 1000.0});

        let by_attr = Target::attributes(&spill);
        let by_key = Target::from_value(&map).unwrap();

        for name in ["name", "amount", "missing"] {
            assert_eq!(by_attr.lookup(name), by_key.lookup(name));
        }
    }

    #[test]
    fn test_null_is_absent() {
        let map = json!({"name": null});
        let target = Target::from_value(&map).unwrap();
        assert_eq!(target.lookup("name"), None);
    }

    #[test]
    fn test_non_object_value_is_not_a_target() {
        assert!(Target::from_value(&json!([1, 2])).is_none());
    }
}
