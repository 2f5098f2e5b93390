use super::*;
use serde_json::json;

fn args(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect()
}

#[test]
fn key_order_does_not_affect_signature() {
    let a = args(&[("file_path", json!("a.txt")), ("offset", json!(0))]);
    let b = args(&[("offset", json!(0)), ("file_path", json!("a.txt"))]);
    assert_eq!(signature("read", &a), signature("read", &b));
}

#[test]
fn different_values_produce_different_signatures() {
    let a = args(&[("file_path", json!("a.txt"))]);
    let b = args(&[("file_path", json!("b.txt"))]);
    assert_ne!(signature("read", &a), signature("read", &b));
}

#[test]
fn arrays_are_comma_joined() {
    let a = args(&[("paths", json!(["a", "b"]))]);
    assert!(signature("glob", &a).contains("a,b"));
}

#[test]
fn nested_objects_sort_keys_recursively() {
    let a = args(&[("filter", json!({"b": 1, "a": 2}))]);
    let sig = signature("search", &a);
    assert!(sig.contains(r#"{"a":2,"b":1}"#));
}
