//! Identity-affecting configuration a pooled agent is keyed on.

use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use relay_config::ReasoningEffort;

/// The fields that determine whether two agents are interchangeable. Two
/// configs that compare equal may share one pooled agent; anything else
/// (per-turn state, thoroughness) lives outside this struct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgentConfig {
    pub system_prompt: String,
    pub tool_names: Vec<String>,
    pub model: String,
    pub reasoning_effort: ReasoningEffort,
}

impl AgentConfig {
    pub fn new(
        system_prompt: impl Into<String>,
        tool_names: impl IntoIterator<Item = String>,
        model: impl Into<String>,
        reasoning_effort: ReasoningEffort,
    ) -> Self {
        let mut tool_names: Vec<String> = tool_names.into_iter().collect();
        tool_names.sort();
        Self {
            system_prompt: system_prompt.into(),
            tool_names,
            model: model.into(),
            reasoning_effort,
        }
    }

    /// A stable hash of the identity-affecting fields, used as the pool's
    /// lookup key. Not exposed as an opaque type since the pool only ever
    /// compares it for equality.
    pub fn key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
#[path = "config.test.rs"]
mod tests;
