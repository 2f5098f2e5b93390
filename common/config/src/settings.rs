//! Orchestrator-wide configuration consulted at engine startup and on
//! `set_max_duration`.
//!
//! This is a pure data bag: no I/O, no environment lookups. Whatever loads
//! configuration (CLI, session persistence, a settings UI) is outside the
//! core and is expected to produce one of these before constructing an
//! [`crate::settings::OrchestratorConfig`].

use serde::Deserialize;
use serde::Serialize;

/// Model/session level knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Context window size in tokens.
    #[serde(default = "default_context_size")]
    pub context_size: i32,
    /// Fraction of context usage (0.0-1.0) that triggers compaction guidance.
    #[serde(default = "default_compact_threshold")]
    pub compact_threshold: f32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum output tokens per model call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: i32,
    /// Reasoning effort level passed to the model client.
    #[serde(default)]
    pub reasoning_effort: ReasoningEffort,
}

fn default_context_size() -> i32 {
    200_000
}
fn default_compact_threshold() -> f32 {
    0.8
}
fn default_temperature() -> f32 {
    0.0
}
fn default_max_tokens() -> i32 {
    8192
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            context_size: default_context_size(),
            compact_threshold: default_compact_threshold(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            reasoning_effort: ReasoningEffort::default(),
        }
    }
}

/// Reasoning effort level requested from the model client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasoningEffort {
    #[default]
    Medium,
    Low,
    High,
}

/// Tool dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDispatchConfig {
    /// Whether parallel execution of safe-concurrent batches is allowed.
    /// When `false`, every batch runs sequentially regardless of classification.
    #[serde(default = "default_true")]
    pub parallel_tools: bool,
    /// Maximum automatic retries for a malformed tool call before giving up.
    #[serde(default = "default_tool_call_max_retries")]
    pub tool_call_max_retries: i32,
    /// Maximum repair attempts for malformed tool_calls JSON.
    #[serde(default = "default_tool_call_repair_attempts")]
    pub tool_call_repair_attempts: i32,
    /// Timeout (seconds) for shell-backed tools.
    #[serde(default = "default_bash_timeout")]
    pub bash_timeout_secs: u64,
    /// Share of context window a single tool result may consume before truncation.
    #[serde(default = "default_tool_result_max_context_percent")]
    pub tool_result_max_context_percent: f32,
    /// Minimum tokens a tool result is allowed to keep even under truncation.
    #[serde(default = "default_tool_result_min_tokens")]
    pub tool_result_min_tokens: i32,
}

fn default_true() -> bool {
    true
}
fn default_tool_call_max_retries() -> i32 {
    2
}
fn default_tool_call_repair_attempts() -> i32 {
    1
}
fn default_bash_timeout() -> u64 {
    120
}
fn default_tool_result_max_context_percent() -> f32 {
    0.25
}
fn default_tool_result_min_tokens() -> i32 {
    256
}

impl Default for ToolDispatchConfig {
    fn default() -> Self {
        Self {
            parallel_tools: default_true(),
            tool_call_max_retries: default_tool_call_max_retries(),
            tool_call_repair_attempts: default_tool_call_repair_attempts(),
            bash_timeout_secs: default_bash_timeout(),
            tool_result_max_context_percent: default_tool_result_max_context_percent(),
            tool_result_min_tokens: default_tool_result_min_tokens(),
        }
    }
}

/// Thresholds consulted by the loop and duplicate detectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Bound on retained `ToolCallHistoryEntry` records.
    #[serde(default = "default_max_tool_history")]
    pub max_tool_history: usize,
    /// Exact-repeat count that triggers a cycle report.
    #[serde(default = "default_cycle_threshold")]
    pub cycle_threshold: usize,
    /// Jaccard-similar repeat count that triggers a "similar calls" report.
    #[serde(default = "default_similar_call_threshold")]
    pub similar_call_threshold: usize,
    /// Same-file read count that triggers a "repeated file access" report.
    #[serde(default = "default_repeated_file_threshold")]
    pub repeated_file_threshold: usize,
    /// Minimum search count before hit-rate is evaluated.
    #[serde(default = "default_min_searches_for_hit_rate")]
    pub min_searches_for_hit_rate: usize,
    /// Hit-rate floor; below this a "low hit rate" report fires.
    #[serde(default = "default_hit_rate_threshold")]
    pub hit_rate_threshold: f32,
    /// Consecutive empty searches that trigger an "empty streak" report.
    #[serde(default = "default_empty_streak_threshold")]
    pub empty_streak_threshold: usize,
    /// Count of trailing distinct signatures that clears a broken cycle.
    #[serde(default = "default_cycle_break_threshold")]
    pub cycle_break_threshold: usize,
}

fn default_max_tool_history() -> usize {
    500
}
fn default_cycle_threshold() -> usize {
    3
}
fn default_similar_call_threshold() -> usize {
    3
}
fn default_repeated_file_threshold() -> usize {
    4
}
fn default_min_searches_for_hit_rate() -> usize {
    5
}
fn default_hit_rate_threshold() -> f32 {
    0.2
}
fn default_empty_streak_threshold() -> usize {
    4
}
fn default_cycle_break_threshold() -> usize {
    3
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_tool_history: default_max_tool_history(),
            cycle_threshold: default_cycle_threshold(),
            similar_call_threshold: default_similar_call_threshold(),
            repeated_file_threshold: default_repeated_file_threshold(),
            min_searches_for_hit_rate: default_min_searches_for_hit_rate(),
            hit_rate_threshold: default_hit_rate_threshold(),
            empty_streak_threshold: default_empty_streak_threshold(),
            cycle_break_threshold: default_cycle_break_threshold(),
        }
    }
}

/// Sub-agent delegation limits and exploratory-streak thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentLimitsConfig {
    /// Maximum delegation stack depth.
    #[serde(default = "default_max_agent_depth")]
    pub max_agent_depth: usize,
    /// Maximum repeats of the same agent type anywhere in the stack.
    #[serde(default = "default_max_agent_cycle_depth")]
    pub max_agent_cycle_depth: usize,
    /// Exploratory-tool streak length that triggers a gentle reminder.
    #[serde(default = "default_exploratory_threshold")]
    pub exploratory_tool_threshold: usize,
    /// Exploratory-tool streak length that triggers a stern reminder.
    #[serde(default = "default_exploratory_stern_threshold")]
    pub exploratory_tool_stern_threshold: usize,
}

fn default_max_agent_depth() -> usize {
    3
}
fn default_max_agent_cycle_depth() -> usize {
    2
}
fn default_exploratory_threshold() -> usize {
    5
}
fn default_exploratory_stern_threshold() -> usize {
    10
}

impl Default for AgentLimitsConfig {
    fn default() -> Self {
        Self {
            max_agent_depth: default_max_agent_depth(),
            max_agent_cycle_depth: default_max_agent_cycle_depth(),
            exploratory_tool_threshold: default_exploratory_threshold(),
            exploratory_tool_stern_threshold: default_exploratory_stern_threshold(),
        }
    }
}

/// Top-level configuration consumed by the engine at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub tools: ToolDispatchConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub agent_limits: AgentLimitsConfig,
}

impl OrchestratorConfig {
    /// Validate cross-field invariants that serde defaults cannot express.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.model.context_size <= 0 {
            return Err(crate::error::ConfigError::InvalidValue {
                field: "model.context_size".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.model.compact_threshold) {
            return Err(crate::error::ConfigError::InvalidValue {
                field: "model.compact_threshold".to_string(),
                reason: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if self.agent_limits.max_agent_cycle_depth == 0 {
            return Err(crate::error::ConfigError::InvalidValue {
                field: "agent_limits.max_agent_cycle_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings.test.rs"]
mod tests;
