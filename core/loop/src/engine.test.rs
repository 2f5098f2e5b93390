use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use relay_activity_stream::ActivityStream;
use relay_config::OrchestratorConfig;
use relay_detection::LoopInfo;
use relay_protocol::ActivityEvent;
use relay_protocol::EventKind;
use relay_protocol::Role;
use relay_protocol::ToolCall;
use relay_protocol::ToolResult;
use relay_tools::ToolRegistry;
use serde_json::Map;

use super::*;

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
    async fn execute(&self, _call: &ToolCall, _ctx: &ToolContext) -> ToolResult {
        ToolResult::ok("X")
    }
}

struct ScriptedModel {
    responses: StdMutex<VecDeque<ModelResponse>>,
    log: Arc<StdMutex<Vec<Vec<Message>>>>,
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn send(&self, messages: &[Message], _options: &ModelRequestOptions) -> ModelResponse {
        self.log.lock().expect("lock poisoned").push(messages.to_vec());
        self.responses.lock().expect("lock poisoned").pop_front().unwrap_or_default()
    }
}

fn engine_with(responses: Vec<ModelResponse>) -> (Engine, Arc<StdMutex<Vec<Vec<Message>>>>) {
    let log = Arc::new(StdMutex::new(Vec::new()));
    let model = Box::new(ScriptedModel {
        responses: StdMutex::new(responses.into_iter().collect()),
        log: Arc::clone(&log),
    });
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ReadTool));
    let engine = Engine::new_root(
        model,
        Arc::new(registry),
        Arc::new(ActivityStream::new()),
        OrchestratorConfig::default(),
        "main",
    );
    (engine, log)
}

#[tokio::test]
async fn simple_text_reply_has_no_tool_calls() {
    let (mut engine, _log) = engine_with(vec![ModelResponse {
        content: "Hello".to_string(),
        tool_calls: Vec::new(),
        interrupted: false,
    }]);

    let reply = engine.send_message(Some("Hi.".to_string())).await;
    assert_eq!(reply, "Hello");
    assert_eq!(engine.message_count(), 2);
    assert_eq!(engine.exploratory_streak(), 0);
    assert_eq!(engine.messages()[0].role, Role::User);
    assert_eq!(engine.messages()[1].role, Role::Assistant);
}

#[tokio::test]
async fn single_tool_call_round_trip_matches_expected_message_sequence() {
    let call = ToolCall::new("c1", "read", {
        let mut args = Map::new();
        args.insert("file_path".to_string(), serde_json::json!("a.txt"));
        args
    });
    let (mut engine, _log) = engine_with(vec![
        ModelResponse {
            content: String::new(),
            tool_calls: vec![call],
            interrupted: false,
        },
        ModelResponse {
            content: "Done.".to_string(),
            tool_calls: Vec::new(),
            interrupted: false,
        },
    ]);

    let reply = engine.send_message(Some("go".to_string())).await;
    assert_eq!(reply, "Done.");

    let roles: Vec<Role> = engine.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::Tool, Role::Assistant]);
    assert!(engine.messages()[1].is_assistant_with_tool_calls());
    assert_eq!(engine.messages()[2].tool_call_id.as_deref(), Some("c1"));
    assert_eq!(engine.exploratory_streak(), 1);
}

#[tokio::test]
async fn interrupted_model_response_stops_the_loop() {
    let (mut engine, _log) = engine_with(vec![ModelResponse {
        content: String::new(),
        tool_calls: Vec::new(),
        interrupted: true,
    }]);

    let reply = engine.send_message(Some("go".to_string())).await;
    assert_eq!(reply, ENGINE_INTERRUPTED_MESSAGE);
}

#[tokio::test]
async fn interrupt_then_next_turn_carries_one_shot_reminder_once() {
    let (mut engine, log) = engine_with(vec![
        ModelResponse {
            content: "ok".to_string(),
            tool_calls: Vec::new(),
            interrupted: false,
        },
        ModelResponse {
            content: "ok again".to_string(),
            tool_calls: Vec::new(),
            interrupted: false,
        },
    ]);

    engine.interrupt(InterruptReason::User);
    engine.send_message(Some("do this instead".to_string())).await;

    let first_call_messages = log.lock().expect("lock poisoned")[0].clone();
    let reminder_count = first_call_messages
        .iter()
        .filter(|m| m.hidden && m.content.contains("User interrupted"))
        .count();
    assert_eq!(reminder_count, 1);

    engine.send_message(Some("third".to_string())).await;
    let third_call_messages = log.lock().expect("lock poisoned")[1].clone();
    assert!(!third_call_messages.iter().any(|m| m.content.contains("User interrupted")));
}

#[tokio::test]
async fn text_loop_detector_is_subscribed_to_response_chunk_events() {
    let (engine, _log) = engine_with(vec![ModelResponse {
        content: "done".to_string(),
        tool_calls: Vec::new(),
        interrupted: false,
    }]);
    let pattern: PatternMatcher = Box::new(|buffer: &str| {
        buffer.contains("LOOP").then(|| LoopInfo {
            pattern_name: "loop-keyword".to_string(),
            message: "saw LOOP repeat in the streamed text".to_string(),
        })
    });
    let engine = engine.with_text_loop_patterns(vec![pattern]);
    assert!(!engine.text_loop_triggered());

    let chunk = format!("{}LOOP", "x".repeat(250));
    engine
        .activity_stream()
        .emit(ActivityEvent::text_chunk(EventKind::ResponseChunk, chunk));

    assert!(engine.text_loop_triggered());
}

#[tokio::test]
async fn reset_clears_conversation_and_counters() {
    let (mut engine, _log) = engine_with(vec![ModelResponse {
        content: "Hello".to_string(),
        tool_calls: Vec::new(),
        interrupted: false,
    }]);
    engine.send_message(Some("Hi.".to_string())).await;
    assert!(engine.message_count() > 0);

    engine.reset();
    assert_eq!(engine.message_count(), 0);
    assert_eq!(engine.current_tokens(), 0);
    assert_eq!(engine.exploratory_streak(), 0);
}
