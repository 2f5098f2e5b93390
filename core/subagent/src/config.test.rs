use relay_config::ReasoningEffort;

use super::*;

#[test]
fn tool_name_order_does_not_affect_key() {
    let a = AgentConfig::new(
        "you are an explorer",
        ["read".to_string(), "grep".to_string()],
        "gpt",
        ReasoningEffort::Medium,
    );
    let b = AgentConfig::new(
        "you are an explorer",
        ["grep".to_string(), "read".to_string()],
        "gpt",
        ReasoningEffort::Medium,
    );
    assert_eq!(a.key(), b.key());
}

#[test]
fn differing_prompt_changes_key() {
    let a = AgentConfig::new("prompt a", ["read".to_string()], "gpt", ReasoningEffort::Medium);
    let b = AgentConfig::new("prompt b", ["read".to_string()], "gpt", ReasoningEffort::Medium);
    assert_ne!(a.key(), b.key());
}

#[test]
fn differing_reasoning_effort_changes_key() {
    let a = AgentConfig::new("prompt", ["read".to_string()], "gpt", ReasoningEffort::Low);
    let b = AgentConfig::new("prompt", ["read".to_string()], "gpt", ReasoningEffort::High);
    assert_ne!(a.key(), b.key());
}
