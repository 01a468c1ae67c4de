//! Form binding
//!
//! Walks the top-level fields of a schema and resolves each one against a
//! target, producing a read-only form view for templates.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::schema::{SchemaField, SchemaResult};

use super::lookup::Target;
use super::resolver::resolve;
use super::value::ResolvedValue;

/// Field name to resolved value, one entry per top-level schema field
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Form {
    values: BTreeMap<String, ResolvedValue>,
}

impl Form {
    /// Resolved value of a top-level field
    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        self.values.get(name)
    }

    /// Dotted access starting at a top-level field
    pub fn path(&self, dotted: &str) -> Option<&ResolvedValue> {
        let (head, rest) = match dotted.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (dotted, None),
        };
        let value = self.values.get(head)?;
        match rest {
            Some(rest) => value.path(rest),
            None => Some(value),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Plain JSON view of the whole form
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

/// Bind every top-level field of `root` against `target`
pub fn bind(root: &SchemaField, target: Option<&Target<'_>>) -> Form {
    Form {
        values: root
            .children
            .iter()
            .map(|field| (field.name.clone(), resolve(field, target)))
            .collect(),
    }
}

/// A validated schema ready for repeated binding
#[derive(Debug, Clone)]
pub struct FormBinder {
    schema: SchemaField,
}

impl FormBinder {
    /// Validate `schema` once and keep it for binding
    pub fn new(schema: SchemaField) -> SchemaResult<Self> {
        schema.validate_structure()?;
        Ok(Self { schema })
    }

    pub fn schema(&self) -> &SchemaField {
        &self.schema
    }

    /// Bind against a target
    pub fn bind(&self, target: Option<&Target<'_>>) -> Form {
        bind(&self.schema, target)
    }

    /// Form populated purely from defaults
    pub fn defaults(&self) -> Form {
        bind(&self.schema, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaError;
    use serde_json::json;

    fn model_schema() -> SchemaField {
        SchemaField::mapping(
            "model_settings",
            vec![
                SchemaField::datetime("start_time"),
                SchemaField::int("duration_days").with_default(1),
                SchemaField::bool("uncertain").with_default(false),
            ],
        )
    }

    #[test]
    fn test_defaults_form() {
        let binder = FormBinder::new(model_schema()).unwrap();
        let form = binder.defaults();

        assert_eq!(form.len(), 3);
        assert!(form.get("start_time").unwrap().is_absent());
        assert_eq!(form.get("duration_days").unwrap().as_scalar(), Some(&json!(1)));
    }

    #[test]
    fn test_bind_mapping_target() {
        let binder = FormBinder::new(model_schema()).unwrap();
        let data = json!({"uncertain": "true", "start_time": "2013-02-13T15:00:00Z"});
        let form = binder.bind(Target::from_value(&data).as_ref());

        assert_eq!(form.get("uncertain").unwrap().as_scalar(), Some(&json!(true)));
        assert_eq!(
            form.to_json(),
            json!({
                "start_time": "2013-02-13T15:00:00",
                "duration_days": 1,
                "uncertain": true
            })
        );
    }

    #[test]
    fn test_malformed_schema_rejected_at_construction() {
        let mut schema = model_schema();
        schema.children.push(SchemaField::int("duration_days"));

        assert!(matches!(
            FormBinder::new(schema),
            Err(SchemaError::DuplicateField(_))
        ));
    }

    #[test]
    fn test_form_path_access() {
        let schema = SchemaField::mapping(
            "root",
            vec![SchemaField::mapping(
                "map",
                vec![SchemaField::string("name").with_default("Map")],
            )],
        );
        let form = bind(&schema, None);

        assert_eq!(form.path("map.name").unwrap().as_scalar(), Some(&json!("Map")));
        assert!(form.path("map.missing").is_none());
    }
}
