use super::*;
use serde_json::Map;

#[test]
fn assistant_with_tool_calls_detects_nonempty() {
    let call = ToolCall::new("c1", "read", Map::new());
    let message = Message::assistant_with_tool_calls("m1", "", vec![call], 0);
    assert!(message.is_assistant_with_tool_calls());
}

#[test]
fn plain_assistant_message_is_not_tool_call_carrier() {
    let message = Message::assistant("m1", "hello", 0);
    assert!(!message.is_assistant_with_tool_calls());
}

#[test]
fn hidden_marks_flag() {
    let message = Message::system("m1", "reminder", 0).hidden();
    assert!(message.hidden);
}

#[test]
fn tool_result_carries_call_id() {
    let message = Message::tool_result("m2", "c1", "X", 1);
    assert_eq!(message.tool_call_id.as_deref(), Some("c1"));
    assert_eq!(message.role, Role::Tool);
}
