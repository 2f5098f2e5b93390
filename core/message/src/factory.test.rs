use super::*;

#[test]
fn ids_are_unique_and_prefixed() {
    let factory = MessageFactory::new("conv");
    let a = factory.next_id();
    let b = factory.next_id();
    assert_ne!(a, b);
    assert!(a.starts_with("conv-"));
}

#[test]
fn constructors_stamp_expected_role_and_content() {
    let factory = MessageFactory::new("conv");
    let user = factory.user("hi", 10);
    assert_eq!(user.content, "hi");
    assert_eq!(user.timestamp, 10);

    let tool = factory.tool_result("c1", "X", 11);
    assert_eq!(tool.tool_call_id.as_deref(), Some("c1"));
}
