//! A single entry in the conversation log.

use serde::Deserialize;
use serde::Serialize;

use crate::ids::MessageId;
use crate::ids::ToolCallId;
use crate::role::Role;
use crate::tool_call::ToolCall;

/// One entry of the append-only conversation log.
///
/// Ordering is strict insertion order; `id` is unique and stable for the
/// lifetime of the conversation. Messages are never mutated after insertion
/// except by whole-message replacement during tool-call repair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<ToolCallId>,
    /// Monotonic milliseconds; only meaningful relative to other messages in
    /// the same conversation.
    pub timestamp: i64,
    /// Hidden messages (e.g. one-shot reminders) are excluded from display
    /// surfaces but still count toward token accounting if inserted.
    #[serde(default)]
    pub hidden: bool,
}

impl Message {
    pub fn system(id: impl Into<MessageId>, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            role: Role::System,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
            timestamp,
            hidden: false,
        }
    }

    pub fn user(id: impl Into<MessageId>, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
            timestamp,
            hidden: false,
        }
    }

    pub fn assistant(id: impl Into<MessageId>, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            role: Role::Assistant,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
            timestamp,
            hidden: false,
        }
    }

    pub fn assistant_with_tool_calls(
        id: impl Into<MessageId>,
        content: impl Into<String>,
        tool_calls: Vec<ToolCall>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            role: Role::Assistant,
            content: content.into(),
            tool_calls: Some(tool_calls),
            tool_call_id: None,
            timestamp,
            hidden: false,
        }
    }

    pub fn tool_result(
        id: impl Into<MessageId>,
        tool_call_id: impl Into<ToolCallId>,
        content: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            role: Role::Tool,
            content: content.into(),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
            timestamp,
            hidden: false,
        }
    }

    /// Mark this message hidden (used for one-shot system reminders that
    /// must never appear in the stored conversation).
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn is_assistant_with_tool_calls(&self) -> bool {
        self.role == Role::Assistant
            && self
                .tool_calls
                .as_ref()
                .is_some_and(|calls| !calls.is_empty())
    }
}

#[cfg(test)]
#[path = "message.test.rs"]
mod tests;
