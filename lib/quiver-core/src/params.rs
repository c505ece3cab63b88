//! Call-time payloads.
//!
//! A payload is a JSON object: field name to value. Key order is insertion
//! order, so merged payloads keep the defaults first and the caller's new keys
//! after them.

use serde_json::Value;

use crate::{Error, Result};

/// A data payload passed to a generated API method.
pub type Params = serde_json::Map<String, Value>;

/// Shallow merge of two payloads.
///
/// Keys from `overlay` win on collision. A key that already exists in `base`
/// keeps its position; new keys are appended.
///
/// # Example
///
/// ```
/// use quiver_core::{Params, merge};
/// use serde_json::json;
///
/// let mut defaults = Params::new();
/// defaults.insert("page".to_string(), json!(1));
/// defaults.insert("size".to_string(), json!(20));
///
/// let mut data = Params::new();
/// data.insert("page".to_string(), json!(3));
///
/// let merged = merge(&defaults, Some(&data));
/// assert_eq!(merged["page"], json!(3));
/// assert_eq!(merged["size"], json!(20));
/// ```
#[must_use]
pub fn merge(base: &Params, overlay: Option<&Params>) -> Params {
    let mut merged = base.clone();
    if let Some(overlay) = overlay {
        for (key, value) in overlay {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Convert any serializable value into a payload.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] if the value does not serialize to a JSON
/// object, or a serialization error if it cannot be serialized at all.
///
/// # Example
///
/// ```
/// use quiver_core::params;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Search { q: String, page: u32 }
///
/// let data = params(&Search { q: "rust".to_string(), page: 2 }).expect("object");
/// assert_eq!(data.len(), 2);
/// ```
pub fn params<T: serde::Serialize>(value: &T) -> Result<Params> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::invalid_request(format!(
            "call data must be an object, got {}",
            kind_of(&other)
        ))),
    }
}

/// Flatten a payload into text pairs for query strings and url-encoded forms.
///
/// Arrays become repeated keys, `null` becomes an empty value and nested
/// objects are written as compact JSON.
#[must_use]
pub fn to_pairs(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().map(|item| (key.clone(), scalar_text(item))));
            }
            other => pairs.push((key.clone(), scalar_text(other))),
        }
    }
    pairs
}

/// Text form of a single value.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> Params {
        params(&value).expect("object payload")
    }

    #[test]
    fn merge_overlay_wins() {
        let defaults = payload(json!({"x": 1, "y": "a"}));
        let data = payload(json!({"x": 2}));

        let merged = merge(&defaults, Some(&data));

        assert_eq!(merged, payload(json!({"x": 2, "y": "a"})));
        // Source mappings are untouched
        assert_eq!(defaults, payload(json!({"x": 1, "y": "a"})));
    }

    #[test]
    fn merge_keeps_defaults_first() {
        let defaults = payload(json!({"b": 1, "a": 2}));
        let data = payload(json!({"z": 3, "a": 4}));

        let merged = merge(&defaults, Some(&data));
        let keys: Vec<_> = merged.keys().map(String::as_str).collect();

        assert_eq!(keys, ["b", "a", "z"]);
    }

    #[test]
    fn merge_without_overlay_copies_base() {
        let defaults = payload(json!({"x": 1}));
        assert_eq!(merge(&defaults, None), defaults);
    }

    #[test]
    fn params_rejects_non_objects() {
        let err = params(&json!([1, 2])).expect_err("array is not a payload");
        assert_eq!(
            err.to_string(),
            "invalid request: call data must be an object, got an array"
        );
    }

    #[test]
    fn to_pairs_flattens_values() {
        let data = payload(json!({
            "q": "rust lang",
            "page": 2,
            "exact": true,
            "tags": ["a", "b"],
            "empty": null,
            "filter": {"kind": "crate"}
        }));

        let pairs = to_pairs(&data);

        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "rust lang".to_string()),
                ("page".to_string(), "2".to_string()),
                ("exact".to_string(), "true".to_string()),
                ("tags".to_string(), "a".to_string()),
                ("tags".to_string(), "b".to_string()),
                ("empty".to_string(), String::new()),
                ("filter".to_string(), r#"{"kind":"crate"}"#.to_string()),
            ]
        );
    }
}
