use super::*;

#[test]
fn defaults_are_valid() {
    let config = OrchestratorConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.agent_limits.max_agent_depth, 3);
    assert_eq!(config.agent_limits.max_agent_cycle_depth, 2);
}

#[test]
fn rejects_non_positive_context_size() {
    let mut config = OrchestratorConfig::default();
    config.model.context_size = 0;
    assert!(config.validate().is_err());
}

#[test]
fn rejects_out_of_range_compact_threshold() {
    let mut config = OrchestratorConfig::default();
    config.model.compact_threshold = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn rejects_zero_cycle_depth() {
    let mut config = OrchestratorConfig::default();
    config.agent_limits.max_agent_cycle_depth = 0;
    assert!(config.validate().is_err());
}

#[test]
fn deserializes_partial_json_with_defaults() {
    let json = r#"{"model": {"temperature": 0.7}}"#;
    let config: OrchestratorConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.model.temperature, 0.7);
    assert_eq!(config.model.context_size, 200_000);
    assert_eq!(config.tools.tool_call_max_retries, 2);
}
