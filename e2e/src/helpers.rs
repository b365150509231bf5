use log::*;
use serde_json::Value;

/// `true` if every field given in `part` is present in `complete` with the same value. Both arguments are JSON text.
pub fn json_is_subset_of(part: &str, complete: &str) -> bool {
    let part: Value = serde_json::from_str(part).expect("Invalid JSON in the expected value");
    let complete: Value = serde_json::from_str(complete).expect("Invalid JSON in the response");
    value_is_subset_of(&part, &complete)
}

/// Objects match when every key of `part` matches in `complete`. Arrays match element-wise and must have the same
/// length. `null` in `part` matches anything.
pub fn value_is_subset_of(part: &Value, complete: &Value) -> bool {
    match (part, complete) {
        (Value::Null, _) => true,
        (Value::Object(expected), Value::Object(actual)) => expected.iter().all(|(key, value)| match actual.get(key) {
            Some(found) => {
                let matches = value_is_subset_of(value, found);
                if !matches {
                    debug!("🌍️ {key}: expected {value}, found {found}");
                }
                matches
            },
            None => {
                debug!("🌍️ {key} is missing");
                false
            },
        }),
        (Value::Array(expected), Value::Array(actual)) => {
            if expected.len() != actual.len() {
                debug!("🌍️ Expected {} items, found {}", expected.len(), actual.len());
                return false;
            }
            expected.iter().zip(actual).all(|(p, c)| value_is_subset_of(p, c))
        },
        (Value::Object(_), _) | (Value::Array(_), _) => {
            debug!("🌍️ Expected {part}, found {complete}");
            false
        },
        _ => part == complete,
    }
}
