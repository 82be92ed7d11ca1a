//! Case-insensitive payload decoding.
//!
//! Producers are not required to match the casing of a shape's field names
//! (`"EMAIL"`, `"Email"` and `"email"` are the same field). Object keys are
//! folded to lowercase before decoding, so shapes must declare lowercase
//! field names. When two keys fold to the same name only one of them is
//! kept; which one is unspecified.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

/// Recursively lowercase every object key in `value`.
pub fn fold_keys(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut folded = Map::with_capacity(map.len());
            for (key, v) in map {
                folded.insert(key.to_lowercase(), fold_keys(v));
            }
            JsonValue::Object(folded)
        }
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}

/// Decode a payload into `T`, ignoring field-name case.
pub fn decode<T>(data: JsonValue) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned,
{
    serde_json::from_value(fold_keys(data))
}
