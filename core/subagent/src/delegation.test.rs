use super::*;

#[test]
fn prompt_agent_is_the_only_non_injectable_tool() {
    assert!(!is_injectable_tool("prompt-agent"));
    assert!(is_injectable_tool("explore"));
    assert!(is_injectable_tool("plan"));
}

#[test]
fn injectable_delegation_routes_to_sub_agent() {
    let mut ctx = DelegationContext::new();
    ctx.begin("call-1", "explore", "agent-1", true);
    assert_eq!(
        ctx.route_interjection("call-1"),
        InterjectionRoute::SubAgent("agent-1".to_string())
    );
}

#[test]
fn non_injectable_delegation_routes_to_root() {
    let mut ctx = DelegationContext::new();
    ctx.begin("call-1", "prompt-agent", "agent-1", false);
    assert_eq!(ctx.route_interjection("call-1"), InterjectionRoute::Root);
}

#[test]
fn unknown_call_id_routes_to_root() {
    let ctx = DelegationContext::new();
    assert_eq!(ctx.route_interjection("ghost"), InterjectionRoute::Root);
}

#[test]
fn state_transitions_and_clear() {
    let mut ctx = DelegationContext::new();
    ctx.begin("call-1", "explore", "agent-1", true);
    assert!(ctx.mark_completing("call-1"));
    assert_eq!(ctx.get("call-1").unwrap().state, DelegationState::Completing);
    assert!(ctx.clear("call-1").is_some());
    assert!(ctx.is_empty());
}

#[test]
fn mark_completing_on_unknown_call_is_false() {
    let mut ctx = DelegationContext::new();
    assert!(!ctx.mark_completing("ghost"));
}
