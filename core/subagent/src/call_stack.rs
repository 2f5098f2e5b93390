//! Delegation depth and cycle-repeat enforcement for the agent call-stack.

/// Why a delegation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthLimitError {
    /// Stack length has already reached `max_depth`.
    MaxDepthExceeded,
    /// `agent_type` already appears `max_cycle_depth` times in the stack.
    MaxCycleDepthExceeded,
}

impl std::fmt::Display for DepthLimitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepthLimitError::MaxDepthExceeded => write!(f, "agent delegation depth limit exceeded"),
            DepthLimitError::MaxCycleDepthExceeded => write!(f, "agent type repeated too many times in delegation stack"),
        }
    }
}

impl std::error::Error for DepthLimitError {}

/// Ordered list of agent type names from root to current, used to reject
/// runaway or cyclic sub-agent delegation.
#[derive(Debug, Clone)]
pub struct AgentCallStack {
    stack: Vec<String>,
    max_depth: usize,
    max_cycle_depth: usize,
}

impl AgentCallStack {
    pub fn new(max_depth: usize, max_cycle_depth: usize) -> Self {
        Self {
            stack: Vec::new(),
            max_depth,
            max_cycle_depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Push `agent_type` onto the stack if doing so stays within both the
    /// depth and cycle-repeat limits; otherwise leave the stack untouched
    /// and return why.
    pub fn try_push(&mut self, agent_type: impl Into<String>) -> Result<(), DepthLimitError> {
        if self.stack.len() >= self.max_depth {
            return Err(DepthLimitError::MaxDepthExceeded);
        }
        let agent_type = agent_type.into();
        let occurrences = self.stack.iter().filter(|t| **t == agent_type).count();
        if occurrences >= self.max_cycle_depth {
            return Err(DepthLimitError::MaxCycleDepthExceeded);
        }
        self.stack.push(agent_type);
        Ok(())
    }

    /// Pop the most recently pushed agent type, on delegation return.
    pub fn pop(&mut self) -> Option<String> {
        self.stack.pop()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.stack
    }
}

#[cfg(test)]
#[path = "call_stack.test.rs"]
mod tests;
