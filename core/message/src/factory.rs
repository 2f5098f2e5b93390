//! Convenience constructors for minting messages with fresh, stable ids.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use relay_protocol::Message;
use relay_protocol::MessageId;
use relay_protocol::ToolCall;
use relay_protocol::ToolCallId;

/// Mints unique message ids scoped to one conversation (`"{prefix}-{n}"`)
/// and stamps messages with a caller-supplied monotonic timestamp.
pub struct MessageFactory {
    prefix: String,
    next_id: AtomicU64,
}

impl MessageFactory {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> MessageId {
        format!("{}-{}", self.prefix, self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    pub fn system(&self, content: impl Into<String>, timestamp: i64) -> Message {
        Message::system(self.next_id(), content, timestamp)
    }

    pub fn user(&self, content: impl Into<String>, timestamp: i64) -> Message {
        Message::user(self.next_id(), content, timestamp)
    }

    pub fn assistant(&self, content: impl Into<String>, timestamp: i64) -> Message {
        Message::assistant(self.next_id(), content, timestamp)
    }

    pub fn assistant_with_tool_calls(
        &self,
        content: impl Into<String>,
        tool_calls: Vec<ToolCall>,
        timestamp: i64,
    ) -> Message {
        Message::assistant_with_tool_calls(self.next_id(), content, tool_calls, timestamp)
    }

    pub fn tool_result(
        &self,
        tool_call_id: impl Into<ToolCallId>,
        content: impl Into<String>,
        timestamp: i64,
    ) -> Message {
        Message::tool_result(self.next_id(), tool_call_id, content, timestamp)
    }
}

#[cfg(test)]
#[path = "factory.test.rs"]
mod tests;
