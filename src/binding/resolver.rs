//! Schema-to-value resolution
//!
//! Resolution order for one field:
//! 1. look the field name up on the target (attribute or key)
//! 2. if found, coerce it; a value that coerces is the result (children
//!    missing from a found mapping take their own defaults)
//! 3. otherwise use the default: the literal default if set, else for
//!    mappings an object assembled from the children's defaults, else absent
//!
//! Resolution never fails. Trees are expected to have passed
//! [`SchemaField::validate_structure`].

use crate::schema::{coerce, SchemaField};

use super::lookup::{Lookup, Target};
use super::value::ResolvedValue;

/// Effective value of `field` on `target`
pub fn resolve(field: &SchemaField, target: Option<&Target<'_>>) -> ResolvedValue {
    let Some(raw) = target.and_then(|t| t.lookup(&field.name)) else {
        return default_value(field);
    };

    match coerce(field, &raw) {
        Some(value) => ResolvedValue::from_value(value),
        None => {
            tracing::trace!(
                field = %field.name,
                kind = field.kind.type_name(),
                "value did not coerce, falling back to default"
            );
            default_value(field)
        }
    }
}

/// Value of `field` built purely from defaults
pub fn default_value(field: &SchemaField) -> ResolvedValue {
    field
        .default_json()
        .map_or(ResolvedValue::Absent, ResolvedValue::from_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wind_field() -> SchemaField {
        SchemaField::mapping(
            "wind",
            vec![
                SchemaField::string("name").with_default("Wind"),
                SchemaField::float("speed"),
                SchemaField::mapping(
                    "source",
                    vec![
                        SchemaField::string("type").with_default("buoy"),
                        SchemaField::bool("active").with_default(false),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_defaults_without_target() {
        let value = resolve(&wind_field(), None);

        assert_eq!(value.path("name").unwrap().as_scalar(), Some(&json!("Wind")));
        assert!(value.path("speed").unwrap().is_absent());
        assert_eq!(
            value.path("source.type").unwrap().as_scalar(),
            Some(&json!("buoy"))
        );
    }

    #[test]
    fn test_found_value_is_coerced() {
        let field = SchemaField::float("speed").with_default(5.0);
        let map = json!({"speed": "12.5"});
        let target = Target::from_value(&map).unwrap();

        assert_eq!(
            resolve(&field, Some(&target)),
            ResolvedValue::Scalar(json!(12.5))
        );
    }

    #[test]
    fn test_uncoercible_value_falls_back_to_default() {
        let field = SchemaField::float("speed").with_default(5.0);
        let map = json!({"speed": "fast"});
        let target = Target::from_value(&map).unwrap();

        assert_eq!(
            resolve(&field, Some(&target)),
            ResolvedValue::Scalar(json!(5.0))
        );
    }

    #[test]
    fn test_found_mapping_is_wrapped() {
        let map = json!({"wind": {"name": "NW wind", "source": {"type": "station"}}});
        let target = Target::from_value(&map).unwrap();

        let value = resolve(&wind_field(), Some(&target));
        assert_eq!(
            value.path("source.type").unwrap().as_scalar(),
            Some(&json!("station"))
        );
        assert_eq!(
            value.path("source.active").unwrap().as_scalar(),
            Some(&json!(false))
        );
        assert_eq!(value.path("name").unwrap().as_scalar(), Some(&json!("NW wind")));
        // No value and no default.
        assert!(value.get("speed").is_none());
    }

    #[test]
    fn test_explicit_mapping_default_wins_over_children() {
        let field = SchemaField::mapping("source", vec![SchemaField::string("type")])
            .with_default(json!({"type": "model"}));

        assert_eq!(
            resolve(&field, None).path("type").unwrap().as_scalar(),
            Some(&json!("model"))
        );
    }

    #[test]
    fn test_sequence_without_default_is_absent() {
        let field = SchemaField::sequence("values", SchemaField::float("v"));
        assert!(resolve(&field, None).is_absent());
    }
}
