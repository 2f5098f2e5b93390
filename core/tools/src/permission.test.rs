use serde_json::Map;

use super::*;

#[tokio::test]
async fn always_allow_allows_every_call() {
    let call = ToolCall::new("c1", "read", Map::new());
    let decision = AlwaysAllow.request(&call).await;
    assert_eq!(decision, PermissionDecision::Allow);
}
