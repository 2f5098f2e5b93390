use std::sync::Arc;

use async_trait::async_trait;
use relay_protocol::ToolCall;
use relay_protocol::ToolResult;

use super::*;
use crate::tool::ToolContext;

struct NoopTool;

#[async_trait]
impl Tool for NoopTool {
    fn name(&self) -> &str {
        "noop"
    }
    fn description(&self) -> &str {
        "does nothing"
    }
    async fn execute(&self, _call: &ToolCall, _ctx: &ToolContext) -> ToolResult {
        ToolResult::ok("")
    }
}

#[test]
fn register_and_lookup_by_name() {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(NoopTool));
    assert!(registry.contains("noop"));
    assert!(registry.get("noop").is_some());
    assert!(registry.get("missing").is_none());
    assert_eq!(registry.len(), 1);
}
