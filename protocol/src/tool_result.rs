//! The outcome of executing one [`crate::tool_call::ToolCall`].

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error_type::ErrorType;
use crate::ids::AgentId;
use crate::tool_types::ContextModifier;

/// Structured detail attached to a failed result, enough for the model (and
/// a human) to understand what went wrong without re-parsing `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub message: String,
    pub tool_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

/// Outcome of one tool execution. Errors are always captured here rather
/// than thrown, so the orchestrator can append a `tool` message unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<ErrorDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_reminder: Option<String>,
    #[serde(default)]
    pub system_reminder_persist: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<AgentId>,
    /// A side effect the caller should fold into conversation context —
    /// e.g. a file's content, for duplicate/staleness tracking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_modifier: Option<ContextModifier>,
}

impl ToolResult {
    /// A successful result with plain-text content.
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// A successful result with structured data instead of text.
    pub fn ok_data(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Default::default()
        }
    }

    /// A failed result with the full structured error envelope.
    pub fn failure(
        error: impl Into<String>,
        error_type: ErrorType,
        tool_name: impl Into<String>,
        parameters: Option<Value>,
    ) -> Self {
        let error = error.into();
        Self {
            success: false,
            error: Some(error.clone()),
            error_type: Some(error_type),
            error_details: Some(ErrorDetails {
                message: error,
                tool_name: tool_name.into(),
                parameters,
            }),
            ..Default::default()
        }
    }

    /// Attach a one-shot (non-persisted) system reminder.
    pub fn with_reminder(mut self, reminder: impl Into<String>) -> Self {
        self.system_reminder = Some(reminder.into());
        self.system_reminder_persist = false;
        self
    }

    /// Attach a reminder that should be persisted as a stored system message.
    pub fn with_persistent_reminder(mut self, reminder: impl Into<String>) -> Self {
        self.system_reminder = Some(reminder.into());
        self.system_reminder_persist = true;
        self
    }

    /// Mark this result as produced by a sub-agent with the given id.
    pub fn with_agent_id(mut self, agent_id: impl Into<AgentId>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Attach a context modifier for the caller to fold in after this
    /// result lands (e.g. a file read's content, for cycle tracking).
    pub fn with_context_modifier(mut self, modifier: ContextModifier) -> Self {
        self.context_modifier = Some(modifier);
        self
    }
}

#[cfg(test)]
#[path = "tool_result.test.rs"]
mod tests;
