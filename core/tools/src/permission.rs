//! The permission collaborator contract consulted by the execute state
//! machine's permission gate.

use async_trait::async_trait;
use relay_protocol::ToolCall;

/// Stable, user-facing string distinguishing a permission denial from
/// ordinary tool content (spec §7: "two stable strings are distinguishable
/// by callers").
pub const PERMISSION_DENIED_MESSAGE: &str = "Permission denied by user.";

/// Outcome of a permission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionDecision {
    Allow,
    Deny,
    Interrupted,
}

/// External collaborator that decides whether a confirmation-requiring
/// tool call may proceed. Not implemented here — only its contract.
#[async_trait]
pub trait PermissionRequester: Send + Sync {
    async fn request(&self, call: &ToolCall) -> PermissionDecision;
}

/// A requester that always allows; useful for tests and for agents running
/// in `PermissionMode::Bypass`.
pub struct AlwaysAllow;

#[async_trait]
impl PermissionRequester for AlwaysAllow {
    async fn request(&self, _call: &ToolCall) -> PermissionDecision {
        PermissionDecision::Allow
    }
}

#[cfg(test)]
#[path = "permission.test.rs"]
mod tests;
