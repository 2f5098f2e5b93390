use super::*;

#[test]
fn pushes_below_depth_limit_succeed() {
    let mut stack = AgentCallStack::new(3, 2);
    assert!(stack.try_push("explore").is_ok());
    assert!(stack.try_push("plan").is_ok());
    assert_eq!(stack.depth(), 2);
}

#[test]
fn push_at_max_depth_is_rejected() {
    let mut stack = AgentCallStack::new(2, 2);
    stack.try_push("explore").unwrap();
    stack.try_push("plan").unwrap();
    assert_eq!(stack.try_push("analyze"), Err(DepthLimitError::MaxDepthExceeded));
    assert_eq!(stack.depth(), 2);
}

#[test]
fn repeating_agent_type_past_cycle_limit_is_rejected() {
    let mut stack = AgentCallStack::new(5, 2);
    stack.try_push("explore").unwrap();
    stack.try_push("explore").unwrap();
    assert_eq!(stack.try_push("explore"), Err(DepthLimitError::MaxCycleDepthExceeded));
    assert_eq!(stack.depth(), 2);
}

#[test]
fn pop_allows_the_type_to_be_pushed_again() {
    let mut stack = AgentCallStack::new(5, 1);
    stack.try_push("explore").unwrap();
    assert_eq!(stack.try_push("explore"), Err(DepthLimitError::MaxCycleDepthExceeded));
    stack.pop();
    assert!(stack.try_push("explore").is_ok());
}
