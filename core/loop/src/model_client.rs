//! The model transport contract (§6.1). Implementations (an HTTP client to
//! the inference server) are an external collaborator; this crate only
//! specifies and consumes the interface.

use async_trait::async_trait;
use relay_config::ReasoningEffort;
use relay_protocol::Message;
use relay_protocol::ToolCall;
use tokio_util::sync::CancellationToken;

/// One tool's model-facing definition: enough for the model to decide when
/// and how to call it. Argument schemas live with the concrete tool
/// implementations, which are out of scope here.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub requires_confirmation: bool,
}

/// Per-request knobs threaded down from [`relay_config::ModelConfig`] plus
/// the tool list and cancellation signal for this turn.
pub struct ModelRequestOptions {
    pub tools: Vec<ToolDefinition>,
    pub temperature: f32,
    pub max_tokens: i32,
    pub reasoning_effort: ReasoningEffort,
    pub stream: bool,
    pub cancellation: CancellationToken,
}

/// What the model produced for one request.
#[derive(Debug, Clone, Default)]
pub struct ModelResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    /// Set when the request was aborted via `cancellation` before completion.
    pub interrupted: bool,
}

/// Transport to the inference server. Not implemented in this crate.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn send(&self, messages: &[Message], options: &ModelRequestOptions) -> ModelResponse;
}

#[cfg(test)]
#[path = "model_client.test.rs"]
mod tests;
