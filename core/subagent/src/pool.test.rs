use relay_config::ReasoningEffort;

use super::*;

struct Explorer(&'static str);

fn config(prompt: &str) -> AgentConfig {
    AgentConfig::new(prompt, ["read".to_string()], "gpt", ReasoningEffort::Medium)
}

#[test]
fn acquire_creates_a_new_agent_when_none_idle() {
    let pool: AgentPool<Explorer> = AgentPool::new();
    let handle = pool.acquire(config("explore"), 0, || Explorer("a"));
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.is_in_use(&handle.agent_id), Some(true));
}

#[test]
fn release_then_acquire_reuses_the_same_agent() {
    let pool: AgentPool<Explorer> = AgentPool::new();
    let first = pool.acquire(config("explore"), 0, || Explorer("a"));
    let first_id = first.agent_id.clone();
    pool.release(&first_id);

    let second = pool.acquire(config("explore"), 1, || Explorer("b"));
    assert_eq!(second.agent_id, first_id);
    assert_eq!(pool.len(), 1);
}

#[test]
fn distinct_configs_never_share_an_agent() {
    let pool: AgentPool<Explorer> = AgentPool::new();
    let first = pool.acquire(config("explore"), 0, || Explorer("a"));
    pool.release(&first.agent_id);
    let second = pool.acquire(config("plan"), 1, || Explorer("b"));
    assert_ne!(first.agent_id, second.agent_id);
    assert_eq!(pool.len(), 2);
}

#[test]
fn acquire_by_id_fails_fast_when_busy() {
    let pool: AgentPool<Explorer> = AgentPool::new();
    let handle = pool.acquire(config("explore"), 0, || Explorer("a"));
    let result = pool.acquire_by_id(&handle.agent_id);
    assert_eq!(result, Err(PoolError::AgentBusy(handle.agent_id.clone())));
}

#[test]
fn acquire_by_id_unknown_is_an_error_not_a_panic() {
    let pool: AgentPool<Explorer> = AgentPool::new();
    let result = pool.acquire_by_id("ghost");
    assert_eq!(result, Err(PoolError::UnknownAgent("ghost".to_string())));
}

#[test]
fn evict_where_removes_only_idle_matches() {
    let pool: AgentPool<Explorer> = AgentPool::new();
    let plugin = pool.acquire(config("plugin:foo"), 0, || Explorer("a"));
    pool.release(&plugin.agent_id);
    let other = pool.acquire(config("core"), 0, || Explorer("b"));

    let removed = pool.evict_where(|config| config.system_prompt.starts_with("plugin:"));
    assert_eq!(removed, 1);
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.is_in_use(&other.agent_id), Some(true));
}

#[test]
fn evict_where_skips_in_use_entries() {
    let pool: AgentPool<Explorer> = AgentPool::new();
    let plugin = pool.acquire(config("plugin:foo"), 0, || Explorer("a"));
    let removed = pool.evict_where(|config| config.system_prompt.starts_with("plugin:"));
    assert_eq!(removed, 0);
    assert_eq!(pool.is_in_use(&plugin.agent_id), Some(true));
}
