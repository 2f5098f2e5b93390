use super::*;

#[test]
fn builder_sets_optional_fields() {
    let event = ActivityEvent::new(EventKind::ToolCallStart)
        .with_tool_call_id("c1")
        .with_agent_id("a1");
    assert_eq!(event.tool_call_id.as_deref(), Some("c1"));
    assert_eq!(event.agent_id.as_deref(), Some("a1"));
}

#[test]
fn text_chunk_wraps_payload_as_string() {
    let event = ActivityEvent::text_chunk(EventKind::ThoughtChunk, "thinking...");
    assert_eq!(event.payload, Some(Value::String("thinking...".to_string())));
}

#[test]
fn display_matches_snake_case_wire_form() {
    assert_eq!(EventKind::UserInterruptInitiated.to_string(), "user_interrupt_initiated");
}
