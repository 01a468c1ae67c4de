//! Schema field definitions
//!
//! A form schema is a tree of [`SchemaField`] nodes:
//! - scalar fields: string, int, float, bool, datetime
//! - mapping: struct-like field whose children are its sub-fields
//! - sequence: homogeneous list whose single child describes the elements
//!
//! Trees are built once per form definition and read-only afterwards.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use super::errors::{SchemaError, SchemaResult};

/// Field kinds understood by the coercion table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// ISO-8601 date and time
    DateTime,
    /// Struct-like field with named children
    Mapping,
    /// Homogeneous list described by one child
    Sequence,
}

impl FieldKind {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
            FieldKind::DateTime => "datetime",
            FieldKind::Mapping => "mapping",
            FieldKind::Sequence => "sequence",
        }
    }

    /// Whether this kind holds a single value with no children
    pub fn is_scalar(&self) -> bool {
        !matches!(self, FieldKind::Mapping | FieldKind::Sequence)
    }
}

/// One node of a schema tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Name used for lookups on targets and in bound forms
    pub name: String,
    /// Kind driving coercion
    pub kind: FieldKind,
    /// Literal default; `None` means the field has no default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Sub-fields (mapping) or the element field (sequence)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaField>,
}

impl SchemaField {
    fn scalar(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            children: Vec::new(),
        }
    }

    /// Create a string field
    pub fn string(name: impl Into<String>) -> Self {
        Self::scalar(name, FieldKind::String)
    }

    /// Create an int field
    pub fn int(name: impl Into<String>) -> Self {
        Self::scalar(name, FieldKind::Int)
    }

    /// Create a float field
    pub fn float(name: impl Into<String>) -> Self {
        Self::scalar(name, FieldKind::Float)
    }

    /// Create a bool field
    pub fn bool(name: impl Into<String>) -> Self {
        Self::scalar(name, FieldKind::Bool)
    }

    /// Create a datetime field
    pub fn datetime(name: impl Into<String>) -> Self {
        Self::scalar(name, FieldKind::DateTime)
    }

    /// Create a mapping field from its sub-fields
    pub fn mapping(name: impl Into<String>, children: Vec<SchemaField>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Mapping,
            default: None,
            children,
        }
    }

    /// Create a sequence field whose elements follow `element`
    pub fn sequence(name: impl Into<String>, element: SchemaField) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Sequence,
            default: None,
            children: vec![element],
        }
    }

    /// Set the literal default
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Find an immediate child by name
    pub fn child(&self, name: &str) -> Option<&SchemaField> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Element field of a sequence
    pub fn element(&self) -> Option<&SchemaField> {
        match self.kind {
            FieldKind::Sequence => self.children.first(),
            _ => None,
        }
    }

    /// Default as canonical JSON
    ///
    /// The literal default if set, else for mappings an object assembled
    /// from the children's defaults (children without one become null),
    /// else `None`.
    pub fn default_json(&self) -> Option<Value> {
        if let Some(default) = &self.default {
            return Some(default.clone());
        }

        match self.kind {
            FieldKind::Mapping => Some(Value::Object(
                self.children
                    .iter()
                    .map(|child| (child.name.clone(), child.default_json().unwrap_or(Value::Null)))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Validates the tree structure (not a value)
    ///
    /// A malformed tree is a programming error in the form definition, so
    /// binders check it once at construction instead of on every lookup.
    pub fn validate_structure(&self) -> SchemaResult<()> {
        self.validate_at(&self.name)
    }

    fn validate_at(&self, path: &str) -> SchemaResult<()> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyName(path.to_string()));
        }

        match self.kind {
            FieldKind::Mapping => {
                let mut seen = HashSet::new();
                for child in &self.children {
                    if !seen.insert(child.name.as_str()) {
                        return Err(SchemaError::DuplicateField(make_path(path, &child.name)));
                    }
                }
                if let Some(default) = &self.default {
                    if !default.is_object() {
                        return Err(SchemaError::InvalidDefault {
                            path: path.to_string(),
                            expected: "mapping",
                        });
                    }
                }
            }
            FieldKind::Sequence => {
                if self.children.len() != 1 {
                    return Err(SchemaError::InvalidSequence {
                        path: path.to_string(),
                        found: self.children.len(),
                    });
                }
                if let Some(default) = &self.default {
                    if !default.is_array() {
                        return Err(SchemaError::InvalidDefault {
                            path: path.to_string(),
                            expected: "sequence",
                        });
                    }
                }
            }
            kind => {
                if !self.children.is_empty() {
                    return Err(SchemaError::UnexpectedChildren {
                        path: path.to_string(),
                        kind: kind.type_name(),
                    });
                }
            }
        }

        for child in &self.children {
            child.validate_at(&make_path(path, &child.name))?;
        }

        Ok(())
    }
}

fn make_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wind_schema() -> SchemaField {
        SchemaField::mapping(
            "wind",
            vec![
                SchemaField::string("name").with_default("Wind"),
                SchemaField::float("speed"),
                SchemaField::mapping(
                    "source",
                    vec![SchemaField::string("id"), SchemaField::bool("is_active")],
                ),
                SchemaField::sequence("timeseries", SchemaField::float("value")),
            ],
        )
    }

    #[test]
    fn test_valid_structure() {
        assert!(wind_schema().validate_structure().is_ok());
    }

    #[test]
    fn test_scalar_with_children_rejected() {
        let mut field = SchemaField::int("count");
        field.children.push(SchemaField::int("nested"));

        let err = field.validate_structure().unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedChildren { .. }));
    }

    #[test]
    fn test_duplicate_child_rejected() {
        let field = SchemaField::mapping(
            "spill",
            vec![SchemaField::string("name"), SchemaField::string("name")],
        );

        let err = field.validate_structure().unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField("spill.name".into()));
    }

    #[test]
    fn test_sequence_needs_one_element_field() {
        let mut field = SchemaField::sequence("values", SchemaField::float("v"));
        field.children.clear();

        let err = field.validate_structure().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSequence { found: 0, .. }));
    }

    #[test]
    fn test_nested_error_path() {
        let field = SchemaField::mapping(
            "model",
            vec![SchemaField::mapping("map", vec![SchemaField::string("")])],
        );

        let err = field.validate_structure().unwrap_err();
        assert_eq!(err, SchemaError::EmptyName("model.map.".into()));
    }

    #[test]
    fn test_mapping_default_must_be_object() {
        let field = SchemaField::mapping("source", vec![SchemaField::string("id")])
            .with_default(json!("not a mapping"));

        assert!(matches!(
            field.validate_structure(),
            Err(SchemaError::InvalidDefault { expected: "mapping", .. })
        ));
    }

    #[test]
    fn test_schema_deserializes_from_json() {
        let field: SchemaField = serde_json::from_value(json!({
            "name": "mover",
            "kind": "mapping",
            "children": [
                {"name": "on", "kind": "bool", "default": true},
                {"name": "uncertain_duration", "kind": "float"}
            ]
        }))
        .unwrap();

        assert_eq!(field.kind, FieldKind::Mapping);
        assert_eq!(field.child("on").unwrap().default, Some(json!(true)));
        assert!(field.validate_structure().is_ok());
    }

    #[test]
    fn test_default_json_assembles_mappings() {
        assert_eq!(
            wind_schema().default_json(),
            Some(json!({
                "name": "Wind",
                "speed": null,
                "source": {"id": null, "is_active": null},
                "timeseries": null
            }))
        );
        assert_eq!(SchemaField::float("speed").default_json(), None);
    }

    #[test]
    fn test_field_kind_names() {
        assert_eq!(FieldKind::DateTime.type_name(), "datetime");
        assert!(FieldKind::Float.is_scalar());
        assert!(!FieldKind::Sequence.is_scalar());
    }
}
