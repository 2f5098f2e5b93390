use super::*;
use serde_json::json;

#[test]
fn argument_looks_up_by_key() {
    let mut args = Map::new();
    args.insert("file_path".to_string(), json!("a.txt"));
    let call = ToolCall::new("c1", "read", args);
    assert_eq!(call.argument("file_path"), Some(&json!("a.txt")));
    assert_eq!(call.argument("missing"), None);
}

#[test]
fn round_trips_through_json() {
    let mut args = Map::new();
    args.insert("count".to_string(), json!(3));
    let call = ToolCall::new("c1", "grep", args);
    let encoded = serde_json::to_string(&call).unwrap();
    let decoded: ToolCall = serde_json::from_str(&encoded).unwrap();
    assert_eq!(call, decoded);
}
