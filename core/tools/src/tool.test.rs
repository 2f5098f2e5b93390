use super::*;
use relay_protocol::ToolResult;

struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "echoes input"
    }

    async fn execute(&self, call: &ToolCall, _ctx: &ToolContext) -> ToolResult {
        ToolResult::ok(call.name.clone())
    }
}

struct WriteTool;

#[async_trait]
impl Tool for WriteTool {
    fn name(&self) -> &str {
        "write"
    }

    fn description(&self) -> &str {
        "writes a file"
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Unsafe
    }

    fn breaks_exploratory_streak(&self) -> bool {
        true
    }

    async fn execute(&self, _call: &ToolCall, _ctx: &ToolContext) -> ToolResult {
        ToolResult::ok("written")
    }
}

#[test]
fn defaults_are_safe_and_non_confirming() {
    let tool = EchoTool;
    assert!(!tool.requires_confirmation());
    assert!(tool.concurrency_safety().is_safe());
    assert!(tool.is_concurrency_safe_for(&Map::new()));
}

#[test]
fn write_tool_overrides_are_honored() {
    let tool = WriteTool;
    assert!(!tool.concurrency_safety().is_safe());
    assert!(tool.breaks_exploratory_streak());
}

#[tokio::test]
async fn execute_runs_through_trait_object() {
    use std::sync::Arc;
    use relay_activity_stream::ActivityStream;
    use tokio_util::sync::CancellationToken;

    let ctx = ToolContext::new(Arc::new(ActivityStream::new()), CancellationToken::new());
    let call = ToolCall::new("c1", "echo", Map::new());
    let tool: Arc<dyn Tool> = Arc::new(EchoTool);
    let result = tool.execute(&call, &ctx).await;
    assert!(result.success);
}
