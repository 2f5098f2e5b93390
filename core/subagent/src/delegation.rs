//! Registry mapping an active tool-call id to the sub-agent it is driving,
//! used to route user interjections that arrive mid-delegation (C11).

use std::collections::HashMap;

use relay_protocol::AgentId;
use relay_protocol::ToolCallId;

/// Tools that are queries rather than delegations skip injection: the
/// interjection belongs to the root conversation, not the nested agent.
const NON_INJECTABLE_TOOLS: &[&str] = &["prompt-agent"];

pub fn is_injectable_tool(tool_name: &str) -> bool {
    !NON_INJECTABLE_TOOLS.contains(&tool_name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationState {
    Executing,
    Completing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationEntry {
    pub tool_name: String,
    pub agent_id: AgentId,
    pub state: DelegationState,
    pub injectable: bool,
}

/// Where a staged user interjection should go while a tool call is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterjectionRoute {
    SubAgent(AgentId),
    Root,
}

#[derive(Debug, Clone, Default)]
pub struct DelegationContext {
    entries: HashMap<ToolCallId, DelegationEntry>,
}

impl DelegationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly dispatched delegating tool call. `injectable` is
    /// derived from [`is_injectable_tool`] by the caller so that policy stays
    /// in one place.
    pub fn begin(
        &mut self,
        call_id: impl Into<ToolCallId>,
        tool_name: impl Into<String>,
        agent_id: impl Into<AgentId>,
        injectable: bool,
    ) {
        self.entries.insert(
            call_id.into(),
            DelegationEntry {
                tool_name: tool_name.into(),
                agent_id: agent_id.into(),
                state: DelegationState::Executing,
                injectable,
            },
        );
    }

    /// Mark a delegation as wrapping up (the sub-agent has returned, the
    /// caller is formatting its result). Returns `false` if unknown.
    pub fn mark_completing(&mut self, call_id: &str) -> bool {
        match self.entries.get_mut(call_id) {
            Some(entry) => {
                entry.state = DelegationState::Completing;
                true
            }
            None => false,
        }
    }

    /// Remove the entry once the tool message has been appended.
    pub fn clear(&mut self, call_id: &str) -> Option<DelegationEntry> {
        self.entries.remove(call_id)
    }

    pub fn get(&self, call_id: &str) -> Option<&DelegationEntry> {
        self.entries.get(call_id)
    }

    /// Decide where a user interjection should land given the delegation
    /// most recently begun. Callers track "the active call" themselves;
    /// this just answers the routing question for one call id.
    pub fn route_interjection(&self, call_id: &str) -> InterjectionRoute {
        match self.entries.get(call_id) {
            Some(entry) if entry.injectable => InterjectionRoute::SubAgent(entry.agent_id.clone()),
            _ => InterjectionRoute::Root,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "delegation.test.rs"]
mod tests;
