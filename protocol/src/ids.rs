//! Opaque identifier aliases.
//!
//! These are plain `String`s at the core boundary: the core never parses or
//! constrains their shape, it only compares them for equality and uses them
//! as map keys. Whatever mints them (a model client, a pool) is free to use
//! uuids, incrementing counters, or anything else stable and unique.

/// Identifies a [`crate::message::Message`] within one conversation.
pub type MessageId = String;

/// Identifies one `ToolCall` within one assistant message.
pub type ToolCallId = String;

/// Identifies a pooled sub-agent instance.
pub type AgentId = String;
