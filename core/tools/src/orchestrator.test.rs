use std::sync::Arc;

use async_trait::async_trait;
use relay_activity_stream::ActivityStream;
use relay_config::DetectionConfig;
use relay_config::ToolDispatchConfig;
use relay_detection::DuplicateDetector;
use relay_protocol::ValidationResult;
use serde_json::json;
use serde_json::Map;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::permission::AlwaysAllow;
use crate::permission::PermissionDecision;

struct ReadTool;

#[async_trait]
impl Tool for ReadTool {
    fn name(&self) -> &str {
        "read"
    }
    fn description(&self) -> &str {
        "reads a file"
    }
    fn is_exploratory_tool(&self) -> bool {
        true
    }
    async fn execute(&self, call: &ToolCall, _ctx: &ToolContext) -> ToolResult {
        ToolResult::ok(format!("contents of {:?}", call.arguments.get("path")))
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
    fn concurrency_safety(&self) -> relay_protocol::ConcurrencySafety {
        relay_protocol::ConcurrencySafety::Unsafe
    }
    async fn execute(&self, _call: &ToolCall, _ctx: &ToolContext) -> ToolResult {
        ToolResult::ok("written")
    }
}

struct ConfirmTool;

#[async_trait]
impl Tool for ConfirmTool {
    fn name(&self) -> &str {
        "danger"
    }
    fn description(&self) -> &str {
        "needs confirmation"
    }
    fn requires_confirmation(&self) -> bool {
        true
    }
    async fn execute(&self, _call: &ToolCall, _ctx: &ToolContext) -> ToolResult {
        ToolResult::ok("done")
    }
}

struct RejectingPermission(PermissionDecision);

#[async_trait]
impl PermissionRequester for RejectingPermission {
    async fn request(&self, _call: &ToolCall) -> PermissionDecision {
        self.0.clone()
    }
}

struct StrictTool;

#[async_trait]
impl Tool for StrictTool {
    fn name(&self) -> &str {
        "strict"
    }
    fn description(&self) -> &str {
        "rejects empty args"
    }
    fn validate(&self, arguments: &Map<String, serde_json::Value>) -> ValidationResult {
        if arguments.is_empty() {
            ValidationResult::error("missing required argument")
        } else {
            ValidationResult::valid()
        }
    }
    async fn execute(&self, _call: &ToolCall, _ctx: &ToolContext) -> ToolResult {
        ToolResult::ok("ok")
    }
}

fn ctx() -> ToolContext {
    ToolContext::new(Arc::new(ActivityStream::new()), CancellationToken::new())
}

#[tokio::test]
async fn all_safe_batch_runs_and_preserves_order() {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ReadTool));
    let mut duplicates = DuplicateDetector::with_defaults(100);
    let mut cycles = ToolCycleDetector::new(&DetectionConfig::default());
    let exploratory = ExploratoryStreakTracker::new(5, 10);
    let permission = AlwaysAllow;
    let dispatch_config = ToolDispatchConfig::default();
    let mut orchestrator = Orchestrator {
        registry: &registry,
        duplicates: &mut duplicates,
        cycles: &mut cycles,
        exploratory: &exploratory,
        permission: &permission,
        tool_dispatch: &dispatch_config,
        inject_exploratory_reminders: true,
    };

    let mut args_a = Map::new();
    args_a.insert("path".to_string(), json!("a.txt"));
    let mut args_b = Map::new();
    args_b.insert("path".to_string(), json!("b.txt"));
    let calls = vec![
        ToolCall::new("1", "read", args_a),
        ToolCall::new("2", "read", args_b),
    ];

    let results = orchestrator.dispatch(&calls, &ctx()).await;
    assert_eq!(results.len(), 2);
    assert!(results[0].content.as_ref().unwrap().contains("a.txt"));
    assert!(results[1].content.as_ref().unwrap().contains("b.txt"));
}

#[tokio::test]
async fn unsafe_call_forces_sequential_execution_of_whole_batch() {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ReadTool));
    registry.register(Arc::new(WriteTool));
    let mut duplicates = DuplicateDetector::with_defaults(100);
    let mut cycles = ToolCycleDetector::new(&DetectionConfig::default());
    let exploratory = ExploratoryStreakTracker::new(5, 10);
    let permission = AlwaysAllow;
    let dispatch_config = ToolDispatchConfig::default();
    let mut orchestrator = Orchestrator {
        registry: &registry,
        duplicates: &mut duplicates,
        cycles: &mut cycles,
        exploratory: &exploratory,
        permission: &permission,
        tool_dispatch: &dispatch_config,
        inject_exploratory_reminders: true,
    };

    let calls = vec![
        ToolCall::new("1", "read", Map::new()),
        ToolCall::new("2", "write", Map::new()),
    ];
    let results = orchestrator.dispatch(&calls, &ctx()).await;
    assert_eq!(results.len(), 2);
    assert!(results[0].success);
    assert!(results[1].success);
}

#[tokio::test]
async fn permission_denial_returns_stable_message() {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ConfirmTool));
    let mut duplicates = DuplicateDetector::with_defaults(100);
    let mut cycles = ToolCycleDetector::new(&DetectionConfig::default());
    let exploratory = ExploratoryStreakTracker::new(5, 10);
    let permission = RejectingPermission(PermissionDecision::Deny);
    let dispatch_config = ToolDispatchConfig::default();
    let mut orchestrator = Orchestrator {
        registry: &registry,
        duplicates: &mut duplicates,
        cycles: &mut cycles,
        exploratory: &exploratory,
        permission: &permission,
        tool_dispatch: &dispatch_config,
        inject_exploratory_reminders: true,
    };

    let calls = vec![ToolCall::new("1", "danger", Map::new())];
    let results = orchestrator.dispatch(&calls, &ctx()).await;
    assert!(!results[0].success);
    assert_eq!(results[0].error.as_deref(), Some(PERMISSION_DENIED_MESSAGE));
    assert_eq!(results[0].error_type, Some(ErrorType::PermissionError));
}

#[tokio::test]
async fn validation_failure_skips_execution() {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(StrictTool));
    let mut duplicates = DuplicateDetector::with_defaults(100);
    let mut cycles = ToolCycleDetector::new(&DetectionConfig::default());
    let exploratory = ExploratoryStreakTracker::new(5, 10);
    let permission = AlwaysAllow;
    let dispatch_config = ToolDispatchConfig::default();
    let mut orchestrator = Orchestrator {
        registry: &registry,
        duplicates: &mut duplicates,
        cycles: &mut cycles,
        exploratory: &exploratory,
        permission: &permission,
        tool_dispatch: &dispatch_config,
        inject_exploratory_reminders: true,
    };

    let calls = vec![ToolCall::new("1", "strict", Map::new())];
    let results = orchestrator.dispatch(&calls, &ctx()).await;
    assert!(!results[0].success);
    assert_eq!(results[0].error_type, Some(ErrorType::ValidationError));
}

#[tokio::test]
async fn unknown_tool_fails_without_panicking() {
    let registry = ToolRegistry::new();
    let mut duplicates = DuplicateDetector::with_defaults(100);
    let mut cycles = ToolCycleDetector::new(&DetectionConfig::default());
    let exploratory = ExploratoryStreakTracker::new(5, 10);
    let permission = AlwaysAllow;
    let dispatch_config = ToolDispatchConfig::default();
    let mut orchestrator = Orchestrator {
        registry: &registry,
        duplicates: &mut duplicates,
        cycles: &mut cycles,
        exploratory: &exploratory,
        permission: &permission,
        tool_dispatch: &dispatch_config,
        inject_exploratory_reminders: true,
    };

    let calls = vec![ToolCall::new("1", "ghost", Map::new())];
    let results = orchestrator.dispatch(&calls, &ctx()).await;
    assert!(!results[0].success);
}

struct FileReadTool;

#[async_trait]
impl Tool for FileReadTool {
    fn name(&self) -> &str {
        "read"
    }
    fn description(&self) -> &str {
        "reads a file and reports its content for cycle tracking"
    }
    fn is_exploratory_tool(&self) -> bool {
        true
    }
    async fn execute(&self, call: &ToolCall, _ctx: &ToolContext) -> ToolResult {
        let path = call
            .arguments
            .get("path")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();
        ToolResult::ok(format!("contents of {path}")).with_context_modifier(ContextModifier::FileRead {
            path: path.into(),
            content: "same content every time".to_string(),
        })
    }
}

#[tokio::test]
async fn parallel_batch_blocks_duplicate_calls_within_the_same_batch() {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ReadTool));
    let mut duplicates = DuplicateDetector::with_defaults(100);
    let mut cycles = ToolCycleDetector::new(&DetectionConfig::default());
    let exploratory = ExploratoryStreakTracker::new(5, 10);
    let permission = AlwaysAllow;
    let dispatch_config = ToolDispatchConfig::default();
    let mut orchestrator = Orchestrator {
        registry: &registry,
        duplicates: &mut duplicates,
        cycles: &mut cycles,
        exploratory: &exploratory,
        permission: &permission,
        tool_dispatch: &dispatch_config,
        inject_exploratory_reminders: true,
    };

    let mut args = Map::new();
    args.insert("path".to_string(), json!("a.txt"));
    let calls = vec![
        ToolCall::new("1", "read", args.clone()),
        ToolCall::new("2", "read", args),
    ];

    let results = orchestrator.dispatch(&calls, &ctx()).await;
    assert!(results[0].success);
    assert!(!results[1].success);
    assert!(results[1]
        .error
        .as_deref()
        .unwrap()
        .contains("duplicate call blocked"));
}

#[tokio::test]
async fn parallel_batch_still_gates_on_permission() {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ConfirmTool));
    let mut duplicates = DuplicateDetector::with_defaults(100);
    let mut cycles = ToolCycleDetector::new(&DetectionConfig::default());
    let exploratory = ExploratoryStreakTracker::new(5, 10);
    let permission = RejectingPermission(PermissionDecision::Deny);
    let dispatch_config = ToolDispatchConfig::default();
    let mut orchestrator = Orchestrator {
        registry: &registry,
        duplicates: &mut duplicates,
        cycles: &mut cycles,
        exploratory: &exploratory,
        permission: &permission,
        tool_dispatch: &dispatch_config,
        inject_exploratory_reminders: true,
    };

    // A single confirmation-requiring call is still classified as a "safe"
    // batch (ConfirmTool defaults to concurrency-safe), so this exercises
    // the parallel dispatch path's permission gate specifically.
    let calls = vec![ToolCall::new("1", "danger", Map::new())];
    let results = orchestrator.dispatch(&calls, &ctx()).await;
    assert!(!results[0].success);
    assert_eq!(results[0].error.as_deref(), Some(PERMISSION_DENIED_MESSAGE));
}

#[tokio::test]
async fn file_read_content_threads_into_cycle_detector_file_hashes() {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(FileReadTool));
    let mut duplicates = DuplicateDetector::with_defaults(100);
    let mut detection_config = DetectionConfig::default();
    detection_config.repeated_file_threshold = 2;
    let mut cycles = ToolCycleDetector::new(&detection_config);
    let exploratory = ExploratoryStreakTracker::new(100, 200);
    let permission = AlwaysAllow;
    let dispatch_config = ToolDispatchConfig {
        parallel_tools: false,
        ..ToolDispatchConfig::default()
    };
    let mut orchestrator = Orchestrator {
        registry: &registry,
        duplicates: &mut duplicates,
        cycles: &mut cycles,
        exploratory: &exploratory,
        permission: &permission,
        tool_dispatch: &dispatch_config,
        inject_exploratory_reminders: false,
    };

    let mut args_a = Map::new();
    args_a.insert("path".to_string(), json!("a.txt"));
    let mut args_b = Map::new();
    args_b.insert("path".to_string(), json!("a.txt"));
    args_b.insert("extra".to_string(), json!("differs-so-it-isnt-an-exact-duplicate"));

    let first = orchestrator.dispatch(&[ToolCall::new("1", "read", args_a)], &ctx()).await;
    assert!(first[0].system_reminder.is_none());

    let second = orchestrator
        .dispatch(&[ToolCall::new("2", "read", args_b)], &ctx())
        .await;
    let reminder = second[0].system_reminder.as_deref().unwrap();
    assert!(reminder.contains("accessed"));
}

#[test]
fn tool_call_repair_stops_at_max_attempts() {
    let mut repair = ToolCallRepair::new(2);
    assert!(repair.next_prompt("bad json").is_some());
    assert!(repair.next_prompt("still bad").is_some());
    assert!(repair.next_prompt("still bad").is_none());
    assert_eq!(repair.attempts_made(), 2);
}
