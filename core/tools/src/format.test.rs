use relay_protocol::ErrorType;
use serde_json::json;

use super::*;

#[test]
fn success_with_content_renders_verbatim() {
    let result = ToolResult::ok("hello");
    assert_eq!(format_tool_result(&result), "hello");
}

#[test]
fn success_with_array_data_summarizes_count() {
    let result = ToolResult::ok_data(json!(["a", "b", "c"]));
    assert_eq!(format_tool_result(&result), "3 result(s)");
}

#[test]
fn failure_renders_error_type_and_message() {
    let result = ToolResult::failure("file missing", ErrorType::FileError, "read", None);
    assert_eq!(format_tool_result(&result), "file_error: file missing");
}
