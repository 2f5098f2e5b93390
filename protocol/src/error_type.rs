//! The wire-level error taxonomy attached to a failed [`crate::tool_result::ToolResult`].

use relay_error::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use strum::AsRefStr;

/// Classification of why a tool call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorType {
    /// Arguments failed syntactic or semantic validation.
    ValidationError,
    /// A missing file, unknown id, or similar user-caused condition.
    UserError,
    /// Permission was requested and denied.
    PermissionError,
    /// A policy violation (path escape, disallowed command, ...).
    SecurityError,
    /// The target file exists/doesn't exist in a way the tool rejects.
    FileError,
    /// The tool ran and failed.
    ExecutionError,
    /// A background plugin / RPC daemon failure.
    PluginError,
    /// An internal bug, not attributable to the caller or environment.
    SystemError,
    /// The tool did not complete within its allotted time.
    TimeoutError,
    /// The call was cancelled by an interrupt.
    Interrupted,
    /// The tool requires an interactive terminal that isn't available.
    InteractiveCommand,
    /// A subprocess the tool launched exited non-zero.
    CommandFailed,
    /// Delegation was refused because the agent call-stack is too deep.
    DepthLimitExceeded,
}

impl ErrorType {
    /// Map to the shared status-code taxonomy used for logging/retry policy.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorType::ValidationError => StatusCode::ValidationError,
            ErrorType::UserError => StatusCode::UserError,
            ErrorType::PermissionError => StatusCode::PermissionError,
            ErrorType::SecurityError => StatusCode::SecurityError,
            ErrorType::FileError => StatusCode::FileError,
            ErrorType::ExecutionError => StatusCode::ExecutionError,
            ErrorType::PluginError => StatusCode::PluginError,
            ErrorType::SystemError => StatusCode::Internal,
            ErrorType::TimeoutError => StatusCode::TimeoutError,
            ErrorType::Interrupted => StatusCode::Interrupted,
            ErrorType::InteractiveCommand => StatusCode::InteractiveCommand,
            ErrorType::CommandFailed => StatusCode::CommandFailed,
            ErrorType::DepthLimitExceeded => StatusCode::DepthLimitExceeded,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.status_code().is_retryable()
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[cfg(test)]
#[path = "error_type.test.rs"]
mod tests;
