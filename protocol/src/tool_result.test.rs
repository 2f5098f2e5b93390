use super::*;

#[test]
fn ok_sets_success_and_content() {
    let result = ToolResult::ok("hello");
    assert!(result.success);
    assert_eq!(result.content.as_deref(), Some("hello"));
    assert!(result.error.is_none());
}

#[test]
fn failure_populates_error_envelope() {
    let result = ToolResult::failure("bad arg", ErrorType::ValidationError, "read", None);
    assert!(!result.success);
    assert_eq!(result.error_type, Some(ErrorType::ValidationError));
    let details = result.error_details.unwrap();
    assert_eq!(details.tool_name, "read");
    assert_eq!(details.message, "bad arg");
}

#[test]
fn reminder_helpers_set_persistence_flag() {
    let result = ToolResult::ok("x").with_reminder("careful");
    assert_eq!(result.system_reminder.as_deref(), Some("careful"));
    assert!(!result.system_reminder_persist);

    let result = ToolResult::ok("x").with_persistent_reminder("remember this");
    assert!(result.system_reminder_persist);
}

#[test]
fn context_modifier_round_trips_through_the_builder() {
    let result = ToolResult::ok("file content").with_context_modifier(ContextModifier::FileRead {
        path: "src/lib.rs".into(),
        content: "fn main() {}".to_string(),
    });
    match result.context_modifier {
        Some(ContextModifier::FileRead { path, content }) => {
            assert_eq!(path, std::path::PathBuf::from("src/lib.rs"));
            assert_eq!(content, "fn main() {}");
        }
        other => panic!("expected FileRead modifier, got {other:?}"),
    }
}
