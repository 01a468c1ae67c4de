//! Recursive key removal on JSON documents.

use serde_json::Value;

/// Remove every key in `keys` from `target` and from all objects nested in it,
/// including objects inside arrays
pub fn delete_keys(target: &mut Value, keys: &[&str]) {
    match target {
        Value::Object(map) => {
            for key in keys {
                map.remove(*key);
            }
            for value in map.values_mut() {
                delete_keys(value, keys);
            }
        }
        Value::Array(items) => {
            for item in items {
                delete_keys(item, keys);
            }
        }
        _ => {}
    }
}
