//! Deterministic serialization of a tool call for cycle and duplicate detection.
//!
//! `signature(name, args) == signature(name, args')` whenever `args` and
//! `args'` are value-equal regardless of key order (invariant 6).

use serde_json::Map;
use serde_json::Value;

/// Canonical string form of a tool call: `name | k1:v1 | k2:v2 | …` with
/// keys sorted lexicographically, array values comma-joined, and object
/// values rendered as canonical JSON.
pub fn signature(name: &str, arguments: &Map<String, Value>) -> String {
    let mut keys: Vec<&String> = arguments.keys().collect();
    keys.sort();

    let mut parts = vec![name.to_string()];
    for key in keys {
        let value = &arguments[key];
        parts.push(format!("{key}:{}", canonical_value(value)));
    }
    parts.join(" | ")
}

/// Canonical-JSON rendering of a single value: object keys sorted
/// recursively, arrays comma-joined, scalars rendered as their JSON literal.
pub fn canonical_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(canonical_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(map) => canonical_json(map),
    }
}

/// Canonical-JSON rendering of an object: `{"k1":v1,"k2":v2}` with keys
/// sorted lexicographically.
pub fn canonical_json(map: &Map<String, Value>) -> String {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    let body = keys
        .into_iter()
        .map(|key| format!("{}:{}", serde_json::to_string(key).unwrap_or_default(), canonical_value(&map[key])))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{body}}}")
}

#[cfg(test)]
#[path = "signature.test.rs"]
mod tests;
