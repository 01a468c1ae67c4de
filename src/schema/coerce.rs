//! Coercion table
//!
//! Normalizes raw values found on targets into the canonical representation
//! of each field kind. Form posts and attribute snapshots often carry
//! numbers and booleans as strings, so every scalar parser accepts both.
//!
//! `None` means "no usable value": the resolver then falls back to the
//! field default.

use serde_json::{Map, Number, Value};

use crate::util::dates::{encode_datetime, parse_datetime};

use super::types::{FieldKind, SchemaField};

/// Coerce `raw` according to `field`'s kind
pub fn coerce(field: &SchemaField, raw: &Value) -> Option<Value> {
    if raw.is_null() {
        return None;
    }

    match field.kind {
        FieldKind::String => coerce_string(raw),
        FieldKind::Int => parse_int(raw).map(Value::from),
        FieldKind::Float => parse_float(raw).and_then(Number::from_f64).map(Value::Number),
        FieldKind::Bool => parse_bool(raw).map(Value::Bool),
        FieldKind::DateTime => raw
            .as_str()
            .and_then(parse_datetime)
            .map(|dt| Value::String(encode_datetime(&dt))),
        FieldKind::Mapping => coerce_mapping(field, raw),
        FieldKind::Sequence => coerce_sequence(field, raw),
    }
}

/// Parse a boolean from a bool, a number, or a conventional string
pub fn parse_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Parse an integer; floats are accepted only when integral
pub fn parse_int(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Parse a finite float
pub fn parse_float(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    value.is_finite().then_some(value)
}

fn coerce_string(raw: &Value) -> Option<Value> {
    match raw {
        Value::String(s) => Some(Value::String(s.clone())),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

// Children missing from the raw mapping, or failing coercion, take their own
// default. Only those still without a value are dropped.
fn coerce_mapping(field: &SchemaField, raw: &Value) -> Option<Value> {
    let obj = raw.as_object()?;
    let mut out = Map::new();

    for child in &field.children {
        let value = obj
            .get(&child.name)
            .and_then(|v| coerce(child, v))
            .or_else(|| child.default_json())
            .filter(|v| !v.is_null());

        if let Some(value) = value {
            out.insert(child.name.clone(), value);
        }
    }

    Some(Value::Object(out))
}

fn coerce_sequence(field: &SchemaField, raw: &Value) -> Option<Value> {
    let items = raw.as_array()?;
    let element = field.element()?;

    Some(Value::Array(
        items.iter().filter_map(|item| coerce(element, item)).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bool_recovered_from_strings() {
        let field = SchemaField::bool("on");
        assert_eq!(coerce(&field, &json!("true")), Some(json!(true)));
        assert_eq!(coerce(&field, &json!("False")), Some(json!(false)));
        assert_eq!(coerce(&field, &json!(1)), Some(json!(true)));
        assert_eq!(coerce(&field, &json!("maybe")), None);
    }

    #[test]
    fn test_numbers_recovered_from_strings() {
        assert_eq!(coerce(&SchemaField::int("n"), &json!("42")), Some(json!(42)));
        assert_eq!(coerce(&SchemaField::int("n"), &json!(3.0)), Some(json!(3)));
        assert_eq!(coerce(&SchemaField::int("n"), &json!(3.5)), None);
        assert_eq!(
            coerce(&SchemaField::float("x"), &json!(" 2.5 ")),
            Some(json!(2.5))
        );
        assert_eq!(coerce(&SchemaField::float("x"), &json!("inf")), None);
    }

    #[test]
    fn test_string_from_scalars() {
        let field = SchemaField::string("name");
        assert_eq!(coerce(&field, &json!(12)), Some(json!("12")));
        assert_eq!(coerce(&field, &json!({"a": 1})), None);
    }

    #[test]
    fn test_null_is_absent() {
        assert_eq!(coerce(&SchemaField::string("name"), &Value::Null), None);
    }

    #[test]
    fn test_datetime_canonical_form() {
        let field = SchemaField::datetime("start_time");
        assert_eq!(
            coerce(&field, &json!("2013-02-13T15:00:00Z")),
            Some(json!("2013-02-13T15:00:00"))
        );
        assert_eq!(coerce(&field, &json!("yesterday")), None);
    }

    #[test]
    fn test_mapping_drops_null_and_unknown_keys() {
        let field = SchemaField::mapping(
            "source",
            vec![SchemaField::string("id"), SchemaField::float("speed")],
        );

        let value = coerce(
            &field,
            &json!({"id": "w1", "speed": null, "extra": true}),
        );
        assert_eq!(value, Some(json!({"id": "w1"})));
    }

    #[test]
    fn test_mapping_fills_missing_children_from_defaults() {
        let field = SchemaField::mapping(
            "wind",
            vec![
                SchemaField::string("name").with_default("Wind"),
                SchemaField::string("units").with_default("knots"),
                SchemaField::float("speed").with_default(5.0),
            ],
        );

        assert_eq!(
            coerce(&field, &json!({"name": "NW", "speed": "fast"})),
            Some(json!({"name": "NW", "units": "knots", "speed": 5.0}))
        );
    }

    #[test]
    fn test_sequence_coerces_elements() {
        let field = SchemaField::sequence("values", SchemaField::int("v"));
        assert_eq!(
            coerce(&field, &json!(["1", 2, "x"])),
            Some(json!([1, 2]))
        );
        assert_eq!(coerce(&field, &json!("1,2")), None);
    }
}
