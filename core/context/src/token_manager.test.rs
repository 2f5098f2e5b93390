use super::*;
use relay_protocol::Message;

fn msg(id: &str, content: &str) -> Message {
    Message::user(id, content, 0)
}

#[test]
fn add_message_tokens_keeps_sum_consistent() {
    let mut manager = TokenManager::new(1000);
    manager.add_message_tokens(&msg("m1", "hello"));
    manager.add_message_tokens(&msg("m2", "hello world"));
    assert_eq!(manager.current_tokens(), manager.by_msg_id_sum());
}

#[test]
fn update_token_count_rebuilds_from_scratch() {
    let mut manager = TokenManager::new(1000);
    manager.add_message_tokens(&msg("m1", "stale"));
    let fresh = vec![msg("m2", "a"), msg("m3", "b")];
    manager.update_token_count(&fresh);
    assert_eq!(manager.current_tokens(), manager.by_msg_id_sum());
}

#[test]
fn reset_returns_to_zero() {
    let mut manager = TokenManager::new(1000);
    manager.add_message_tokens(&msg("m1", "hello"));
    manager.reset();
    assert_eq!(manager.current_tokens(), 0);
    assert_eq!(manager.by_msg_id_sum(), 0);
}

#[test]
fn duplicate_content_returns_first_call_id() {
    let mut manager = TokenManager::new(1000);
    assert_eq!(manager.track_tool_result(&"c1".to_string(), "X"), None);
    assert_eq!(
        manager.track_tool_result(&"c2".to_string(), "X"),
        Some("c1".to_string())
    );
}

#[test]
fn same_call_id_same_content_returns_none() {
    let mut manager = TokenManager::new(1000);
    assert_eq!(manager.track_tool_result(&"c1".to_string(), "X"), None);
    assert_eq!(manager.track_tool_result(&"c1".to_string(), "X"), None);
}

#[test]
fn context_usage_percentage_is_clamped() {
    let mut manager = TokenManager::new(100);
    manager.add_message_tokens(&msg("m1", &"x".repeat(1000)));
    assert_eq!(manager.get_context_usage_percentage(), 100);
}

#[test]
fn is_above_threshold_and_remaining_tokens() {
    let mut manager = TokenManager::new(100);
    manager.add_message_tokens(&msg("m1", &"x".repeat(40)));
    assert!(manager.is_above_threshold(5));
    assert!(manager.get_remaining_tokens() < 100);
}
