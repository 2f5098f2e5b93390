//! The tool implementation contract (§6.2): name, schema flags, and the
//! async `execute` entry point.

use std::sync::Arc;

use async_trait::async_trait;
use relay_activity_stream::ActivityStream;
use relay_protocol::ConcurrencySafety;
use relay_protocol::ToolCall;
use relay_protocol::ToolCallId;
use relay_protocol::ToolResult;
use relay_protocol::ValidationResult;
use serde_json::Map;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Collaborators handed to a tool at execution time. The core never
/// constructs the concrete capabilities (path security, read-state) — it
/// only threads them through.
#[derive(Clone)]
pub struct ToolContext {
    pub activity_stream: Arc<ActivityStream>,
    pub cancellation: CancellationToken,
    pub parent_call_id: Option<ToolCallId>,
}

impl ToolContext {
    pub fn new(activity_stream: Arc<ActivityStream>, cancellation: CancellationToken) -> Self {
        Self {
            activity_stream,
            cancellation,
            parent_call_id: None,
        }
    }

    pub fn with_parent_call_id(mut self, parent_call_id: impl Into<ToolCallId>) -> Self {
        self.parent_call_id = Some(parent_call_id.into());
        self
    }
}

/// One registered tool. Concrete implementations (shell, file I/O, search,
/// editors, plugins) are external collaborators; this crate only dispatches
/// to whatever implements this trait.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Whether the permission collaborator must be consulted before execution.
    fn requires_confirmation(&self) -> bool {
        false
    }

    /// Read-only, information-gathering tools (read, grep, glob, list).
    fn is_exploratory_tool(&self) -> bool {
        false
    }

    /// Whether a successful call resets the exploratory streak. Defaults to
    /// the inverse of `is_exploratory_tool`: exploratory calls extend the
    /// streak, everything else breaks it.
    fn breaks_exploratory_streak(&self) -> bool {
        !self.is_exploratory_tool()
    }

    /// Whether this tool's output should be hidden from display surfaces
    /// while still counting toward token accounting.
    fn hide_output(&self) -> bool {
        false
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Safe
    }

    /// Per-tool override: some tools are unsafe only for specific argument
    /// shapes (e.g. a shell tool running a read-only command). Defaults to
    /// the tool's static `concurrency_safety`.
    fn is_concurrency_safe_for(&self, _arguments: &Map<String, Value>) -> bool {
        self.concurrency_safety().is_safe()
    }

    /// Syntactic/semantic argument validation, run before permission checks.
    fn validate(&self, _arguments: &Map<String, Value>) -> ValidationResult {
        ValidationResult::valid()
    }

    /// Pre-permission validation (e.g. write-to-existing without overwrite):
    /// a terminal error here skips the permission prompt entirely.
    fn validate_preconditions(&self, _arguments: &Map<String, Value>) -> ValidationResult {
        ValidationResult::valid()
    }

    async fn execute(&self, call: &ToolCall, ctx: &ToolContext) -> ToolResult;
}

#[cfg(test)]
#[path = "tool.test.rs"]
mod tests;
