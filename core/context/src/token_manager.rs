//! Rolling token accounting, per-message caching, and duplicate-content
//! detection for tool results (C2).

use std::collections::HashMap;

use relay_protocol::Message;
use relay_protocol::MessageId;
use relay_protocol::ToolCallId;
use sha1::Digest;
use sha1::Sha1;

use crate::calculator::ContextCalculator;

/// Token accounting state for one conversation.
///
/// Invariant: `current_tokens == Σ by_msg_id[m]` for every message currently
/// tracked; `tool_content_hash` retains the *first* call id seen for each
/// unique tool-result content.
#[derive(Debug, Clone)]
pub struct TokenManager {
    calculator: ContextCalculator,
    context_size: i32,
    current_tokens: i32,
    by_msg_id: HashMap<MessageId, i32>,
    tool_content_hash: HashMap<String, ToolCallId>,
}

impl TokenManager {
    pub fn new(context_size: i32) -> Self {
        Self::with_calculator(context_size, ContextCalculator::default())
    }

    pub fn with_calculator(context_size: i32, calculator: ContextCalculator) -> Self {
        Self {
            calculator,
            context_size,
            current_tokens: 0,
            by_msg_id: HashMap::new(),
            tool_content_hash: HashMap::new(),
        }
    }

    /// Estimate the combined token count of `messages`, caching each
    /// message's estimate by id as a side effect. Does not touch
    /// `current_tokens` — callers use this for a trial estimate (e.g. a
    /// candidate batch not yet appended) vs. `add_message_tokens` for the
    /// live running total.
    pub fn estimate_messages_tokens(&mut self, messages: &[Message]) -> i32 {
        messages.iter().map(|m| self.cache_estimate(m)).sum()
    }

    /// Incrementally account for one newly appended message.
    pub fn add_message_tokens(&mut self, message: &Message) {
        let tokens = self.cache_estimate(message);
        self.current_tokens += tokens;
    }

    /// Full rebuild from the given conversation snapshot. Used on reset or
    /// after an external mutation (e.g. a compaction that rewrote history).
    pub fn update_token_count(&mut self, messages: &[Message]) {
        self.by_msg_id.clear();
        self.current_tokens = messages.iter().map(|m| self.cache_estimate(m)).sum();
    }

    fn cache_estimate(&mut self, message: &Message) -> i32 {
        let tokens = self.calculator.estimate_tokens(&message.content);
        self.by_msg_id.insert(message.id.clone(), tokens);
        tokens
    }

    /// Record a tool result's content and report the first call id that
    /// produced identical content, if this isn't it (invariant 3).
    pub fn track_tool_result(&mut self, call_id: &ToolCallId, content: &str) -> Option<ToolCallId> {
        let hash = Self::hash_content(content);
        match self.tool_content_hash.get(&hash) {
            Some(first) if first == call_id => None,
            Some(first) => Some(first.clone()),
            None => {
                self.tool_content_hash.insert(hash, call_id.clone());
                None
            }
        }
    }

    fn hash_content(content: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// `min(100, round(100 * currentTokens / contextSize))`.
    pub fn get_context_usage_percentage(&self) -> i32 {
        if self.context_size <= 0 {
            return 100;
        }
        let pct = (100.0 * self.current_tokens as f32 / self.context_size as f32).round() as i32;
        pct.clamp(0, 100)
    }

    pub fn is_above_threshold(&self, pct: i32) -> bool {
        self.get_context_usage_percentage() >= pct
    }

    pub fn get_remaining_tokens(&self) -> i32 {
        (self.context_size - self.current_tokens).max(0)
    }

    pub fn current_tokens(&self) -> i32 {
        self.current_tokens
    }

    pub fn by_msg_id_sum(&self) -> i32 {
        self.by_msg_id.values().sum()
    }

    pub fn reset(&mut self) {
        self.current_tokens = 0;
        self.by_msg_id.clear();
        self.tool_content_hash.clear();
    }
}

#[cfg(test)]
#[path = "token_manager.test.rs"]
mod tests;
