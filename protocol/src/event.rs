//! Lifecycle events published on the activity stream (C1).

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use strum::AsRefStr;

use crate::ids::AgentId;
use crate::ids::ToolCallId;

/// The kind discriminator an [`ActivityEvent`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    AgentStart,
    AgentEnd,
    ThoughtChunk,
    ResponseChunk,
    ToolCallStart,
    ToolOutputChunk,
    ToolCallEnd,
    Error,
    UserInterruptInitiated,
    InterruptAll,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// One published event. `payload` carries kind-specific data (e.g. the text
/// fragment for a `ThoughtChunk`/`ResponseChunk`, or the tool name for a
/// `ToolCallStart`); subscribers are expected to know the shape for the
/// kinds they listen on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<AgentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<ToolCallId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl ActivityEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            agent_id: None,
            tool_call_id: None,
            payload: None,
        }
    }

    pub fn with_agent_id(mut self, agent_id: impl Into<AgentId>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn with_tool_call_id(mut self, tool_call_id: impl Into<ToolCallId>) -> Self {
        self.tool_call_id = Some(tool_call_id.into());
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn text_chunk(kind: EventKind, text: impl Into<String>) -> Self {
        Self::new(kind).with_payload(Value::String(text.into()))
    }
}

#[cfg(test)]
#[path = "event.test.rs"]
mod tests;
