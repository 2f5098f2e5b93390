//! Tool execution characteristics shared between the registry and the
//! orchestrator.

use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// Concurrency safety level declared by a tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConcurrencySafety {
    /// Read-only / effect-free; safe to run alongside other safe calls.
    #[default]
    Safe,
    /// Must run exclusively of every other call in its batch.
    Unsafe,
}

impl ConcurrencySafety {
    pub fn is_safe(&self) -> bool {
        matches!(self, ConcurrencySafety::Safe)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConcurrencySafety::Safe => "safe",
            ConcurrencySafety::Unsafe => "unsafe",
        }
    }
}

impl std::fmt::Display for ConcurrencySafety {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A modifier that changes the conversation context as a side effect of a
/// tool's execution, applied by the caller after the `ToolResult` lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContextModifier {
    /// A file was read; record its content for duplicate/staleness tracking.
    FileRead { path: PathBuf, content: String },
    /// A permission grant that should apply to future operations too.
    PermissionGranted { tool: String, pattern: String },
    /// A skill restricts which tools may run while it is active.
    SkillAllowedTools {
        skill_name: String,
        allowed_tools: Vec<String>,
    },
}

/// Result of validating a tool call's arguments before execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ValidationResult {
    Valid,
    Invalid { errors: Vec<ValidationError> },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn valid() -> Self {
        ValidationResult::Valid
    }

    pub fn invalid(errors: impl IntoIterator<Item = ValidationError>) -> Self {
        ValidationResult::Invalid {
            errors: errors.into_iter().collect(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ValidationResult::Invalid {
            errors: vec![ValidationError::new(message)],
        }
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{path}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
#[path = "tool_types.test.rs"]
mod tests;
