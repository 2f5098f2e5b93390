//! Shared wire types for the agent orchestrator core: messages, tool calls
//! and results, activity events, and the canonical-signature scheme used
//! for duplicate and cycle detection.

mod error_type;
mod event;
mod ids;
mod message;
mod role;
pub mod signature;
mod tool_call;
mod tool_result;
mod tool_types;

pub use error_type::ErrorType;
pub use event::ActivityEvent;
pub use event::EventKind;
pub use ids::AgentId;
pub use ids::MessageId;
pub use ids::ToolCallId;
pub use message::Message;
pub use role::Role;
pub use tool_call::ToolCall;
pub use tool_result::ErrorDetails;
pub use tool_result::ToolResult;
pub use tool_types::ConcurrencySafety;
pub use tool_types::ContextModifier;
pub use tool_types::ValidationError;
pub use tool_types::ValidationResult;
