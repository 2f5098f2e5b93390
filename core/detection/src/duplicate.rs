//! Per-turn and cross-turn signature tracking for tool calls (C4).

use std::collections::HashMap;
use std::collections::HashSet;

use relay_protocol::signature::signature;
use serde_json::Map;
use serde_json::Value;

/// Outcome of [`DuplicateDetector::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateCheck {
    pub is_duplicate: bool,
    pub should_block: bool,
    pub message: Option<String>,
}

impl DuplicateCheck {
    fn not_duplicate() -> Self {
        Self {
            is_duplicate: false,
            should_block: false,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CallHistoryEntry {
    turn_number: u64,
    timestamp: i64,
}

/// Tracks signatures of previously executed tool calls so the orchestrator
/// can block exact same-turn repeats and advise on cross-turn repeats.
#[derive(Debug, Clone)]
pub struct DuplicateDetector {
    tracked_tools: HashSet<String>,
    call_history: HashMap<String, CallHistoryEntry>,
    current_turn: u64,
    max_records: usize,
}

/// The read-class tools tracked by default: exact-repeat detection is
/// primarily useful for idempotent, information-gathering calls.
pub fn default_tracked_tools() -> HashSet<String> {
    ["read", "grep", "glob", "list"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl DuplicateDetector {
    pub fn new(tracked_tools: HashSet<String>, max_records: usize) -> Self {
        Self {
            tracked_tools,
            call_history: HashMap::new(),
            current_turn: 0,
            max_records,
        }
    }

    pub fn with_defaults(max_records: usize) -> Self {
        Self::new(default_tracked_tools(), max_records)
    }

    pub fn check(&self, tool_name: &str, arguments: &Map<String, Value>) -> DuplicateCheck {
        if !self.tracked_tools.contains(tool_name) {
            return DuplicateCheck::not_duplicate();
        }
        let sig = signature(tool_name, arguments);
        match self.call_history.get(&sig) {
            None => DuplicateCheck::not_duplicate(),
            Some(entry) if entry.turn_number == self.current_turn => DuplicateCheck {
                is_duplicate: true,
                should_block: true,
                message: Some(format!(
                    "{tool_name} was already called with identical arguments this turn"
                )),
            },
            Some(entry) => DuplicateCheck {
                is_duplicate: true,
                should_block: false,
                message: Some(format!(
                    "{tool_name} was called with identical arguments in turn {}",
                    entry.turn_number
                )),
            },
        }
    }

    /// Record a successfully executed call so later checks can see it.
    pub fn record_call(&mut self, tool_name: &str, arguments: &Map<String, Value>, timestamp: i64) {
        if !self.tracked_tools.contains(tool_name) {
            return;
        }
        let sig = signature(tool_name, arguments);
        self.call_history.insert(
            sig,
            CallHistoryEntry {
                turn_number: self.current_turn,
                timestamp,
            },
        );
        self.evict_oldest_if_over_capacity();
    }

    fn evict_oldest_if_over_capacity(&mut self) {
        while self.call_history.len() > self.max_records {
            let oldest = self
                .call_history
                .iter()
                .min_by_key(|(_, entry)| entry.timestamp)
                .map(|(sig, _)| sig.clone());
            match oldest {
                Some(sig) => {
                    self.call_history.remove(&sig);
                }
                None => break,
            }
        }
    }

    /// Advance the turn counter at the boundary between user inputs.
    pub fn next_turn(&mut self) {
        self.current_turn += 1;
    }

    pub fn current_turn(&self) -> u64 {
        self.current_turn
    }

    pub fn reset(&mut self) {
        self.call_history.clear();
        self.current_turn = 0;
    }
}

#[cfg(test)]
#[path = "duplicate.test.rs"]
mod tests;
