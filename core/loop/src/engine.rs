//! The main send/receive loop, recursive tool-call handling, interruption
//! semantics, and system-reminder injection (C10).

use std::sync::Arc;
use std::sync::Mutex;

use relay_activity_stream::ActivityStream;
use relay_activity_stream::Topic;
use relay_config::ModelConfig;
use relay_config::OrchestratorConfig;
use relay_config::ToolDispatchConfig;
use relay_context::TokenManager;
use relay_detection::DuplicateDetector;
use relay_detection::PatternMatcher;
use relay_detection::TextStreamDetector;
use relay_detection::ToolCycleDetector;
use relay_message::ConversationStore;
use relay_message::MessageFactory;
use relay_protocol::ActivityEvent;
use relay_protocol::EventKind;
use relay_protocol::Message;
use relay_subagent::AgentCallStack;
use relay_subagent::DelegationContext;
use relay_subagent::DepthLimitError;
use relay_timing::ActivityMonitor;
use relay_timing::TurnManager;
use relay_tools::format_tool_result;
use relay_tools::AlwaysAllow;
use relay_tools::ExploratoryStreakTracker;
use relay_tools::Orchestrator;
use relay_tools::PermissionRequester;
use relay_tools::Tool;
use relay_tools::ToolContext;
use relay_tools::ToolRegistry;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::model_client::ModelClient;
use crate::model_client::ModelRequestOptions;
use crate::model_client::ToolDefinition;

/// Returned by [`Engine::send_message`] when the turn was cut short by
/// cancellation. Distinguishable from ordinary content (spec §7).
pub const ENGINE_INTERRUPTED_MESSAGE: &str = "Interrupted.";

/// One-shot outbound-only reminder prepended after `interrupt(User)`. Never
/// persisted to the conversation store.
pub const USER_INTERRUPTED_REMINDER: &str =
    "User interrupted the previous response. Take this into account before continuing.";

/// Appended to the store and returned when a turn's wall-clock budget runs out.
pub const MAX_DURATION_EXCEEDED_MESSAGE: &str = "Maximum turn duration exceeded; stopping this turn.";

const DEFAULT_WATCHDOG_TIMEOUT: Duration = Duration::from_secs(300);
const DEFAULT_WATCHDOG_CHECK_INTERVAL: Duration = Duration::from_secs(5);

// Streaming model transport is out of scope (spec §1), so `send_message`
// always requests `stream: false` and no `ResponseChunk` events are emitted
// today. `text_loop` is still built and subscribed here rather than left
// unowned, so the moment a `ModelClient` implementation starts emitting
// `ResponseChunk` chunks (e.g. once a streaming transport lands), loop
// detection over that text is already wired and just starts firing.
const DEFAULT_TEXT_LOOP_WARMUP_CHARS: usize = 200;
const DEFAULT_TEXT_LOOP_CHECK_INTERVAL_CHARS: usize = 80;

/// Why [`Engine::interrupt`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptReason {
    /// The user explicitly cancelled the in-flight response.
    User,
    /// A staged interjection should be picked up on the next iteration.
    Interjection,
}

/// A conversation plus its engine, token manager, conversation store,
/// detectors, monitor, and tool orchestrator — one logical agent.
pub struct Engine {
    model: Box<dyn ModelClient>,
    tools: Arc<ToolRegistry>,
    activity_stream: Arc<ActivityStream>,
    store: ConversationStore,
    factory: MessageFactory,
    tokens: TokenManager,
    duplicates: DuplicateDetector,
    cycles: ToolCycleDetector,
    text_loop: Arc<Mutex<TextStreamDetector>>,
    exploratory: ExploratoryStreakTracker,
    turn_manager: TurnManager,
    activity_monitor: Arc<ActivityMonitor>,
    permission: Arc<dyn PermissionRequester>,
    call_stack: Arc<Mutex<AgentCallStack>>,
    delegation: DelegationContext,
    cancellation: CancellationToken,
    was_interrupted: bool,
    pending_reminder: Option<String>,
    is_top_level: bool,
    inject_exploratory_reminders: bool,
    tool_dispatch: ToolDispatchConfig,
    model_config: ModelConfig,
    now: Box<dyn Fn() -> i64 + Send + Sync>,
}

impl Engine {
    /// Build a root (top-level) engine with a fresh call-stack and watchdog.
    pub fn new_root(
        model: Box<dyn ModelClient>,
        tools: Arc<ToolRegistry>,
        activity_stream: Arc<ActivityStream>,
        config: OrchestratorConfig,
        agent_type: impl Into<String>,
    ) -> Self {
        let call_stack = Arc::new(Mutex::new(AgentCallStack::new(
            config.agent_limits.max_agent_depth,
            config.agent_limits.max_agent_cycle_depth,
        )));
        Self::new_with_stack(model, tools, activity_stream, config, agent_type, call_stack, true)
    }

    /// Build a sub-agent engine sharing the root's delegation call-stack,
    /// used by (out-of-scope) delegating tool implementations after a
    /// successful [`Engine::try_begin_delegation`].
    pub fn new_delegated(
        model: Box<dyn ModelClient>,
        tools: Arc<ToolRegistry>,
        activity_stream: Arc<ActivityStream>,
        config: OrchestratorConfig,
        agent_type: impl Into<String>,
        call_stack: Arc<Mutex<AgentCallStack>>,
    ) -> Self {
        Self::new_with_stack(model, tools, activity_stream, config, agent_type, call_stack, false)
    }

    fn new_with_stack(
        model: Box<dyn ModelClient>,
        tools: Arc<ToolRegistry>,
        activity_stream: Arc<ActivityStream>,
        config: OrchestratorConfig,
        agent_type: impl Into<String>,
        call_stack: Arc<Mutex<AgentCallStack>>,
        is_top_level: bool,
    ) -> Self {
        let stream_for_watchdog = activity_stream.clone();
        let agent_type = agent_type.into();
        let watchdog_agent_type = agent_type.clone();

        let text_loop = Arc::new(Mutex::new(TextStreamDetector::new(
            DEFAULT_TEXT_LOOP_WARMUP_CHARS,
            DEFAULT_TEXT_LOOP_CHECK_INTERVAL_CHARS,
            Vec::new(),
        )));
        let text_loop_for_sub = Arc::clone(&text_loop);
        activity_stream.subscribe(Topic::Kind(EventKind::ResponseChunk), move |event| {
            let Some(text) = event.payload.as_ref().and_then(|payload| payload.as_str()) else {
                return;
            };
            let mut detector = text_loop_for_sub.lock().expect("lock poisoned");
            if let Some(info) = detector.push_chunk(text) {
                tracing::warn!(pattern = %info.pattern_name, message = %info.message, "text-stream loop detected");
            }
        });

        Self {
            model,
            tools,
            activity_stream,
            store: ConversationStore::new(),
            factory: MessageFactory::new(agent_type),
            tokens: TokenManager::new(config.model.context_size),
            duplicates: DuplicateDetector::with_defaults(config.detection.max_tool_history),
            cycles: ToolCycleDetector::new(&config.detection),
            text_loop,
            exploratory: ExploratoryStreakTracker::new(
                config.agent_limits.exploratory_tool_threshold,
                config.agent_limits.exploratory_tool_stern_threshold,
            ),
            turn_manager: TurnManager::new(),
            activity_monitor: Arc::new(ActivityMonitor::new(
                DEFAULT_WATCHDOG_TIMEOUT,
                DEFAULT_WATCHDOG_CHECK_INTERVAL,
                move || {
                    tracing::warn!(agent = %watchdog_agent_type, "agent activity watchdog timed out");
                    stream_for_watchdog.emit(ActivityEvent::new(EventKind::Error));
                },
            )),
            permission: Arc::new(AlwaysAllow),
            call_stack,
            delegation: DelegationContext::new(),
            cancellation: CancellationToken::new(),
            was_interrupted: false,
            pending_reminder: None,
            is_top_level,
            inject_exploratory_reminders: is_top_level,
            tool_dispatch: config.tools,
            model_config: config.model,
            now: Box::new(wall_clock_millis),
        }
    }

    /// Override the default allow-everything permission collaborator.
    pub fn with_permission(mut self, permission: Arc<dyn PermissionRequester>) -> Self {
        self.permission = permission;
        self
    }

    /// Replace the text-stream loop detector's pattern matchers. Concrete
    /// patterns are an external collaborator's concern (spec §4 leaves
    /// `PatternMatcher` opaque); the engine only owns the rolling buffer and
    /// the warmup/check-interval bookkeeping around whatever is supplied.
    pub fn with_text_loop_patterns(self, patterns: Vec<PatternMatcher>) -> Self {
        *self.text_loop.lock().expect("lock poisoned") =
            TextStreamDetector::new(DEFAULT_TEXT_LOOP_WARMUP_CHARS, DEFAULT_TEXT_LOOP_CHECK_INTERVAL_CHARS, patterns);
        self
    }

    /// The core algorithm (spec §4.10). Drives the model until it returns a
    /// response with no tool calls, or the turn is interrupted/times out.
    pub async fn send_message(&mut self, text: Option<String>) -> String {
        self.turn_manager.start_turn();
        self.duplicates.next_turn();
        if self.was_interrupted {
            self.cancellation = CancellationToken::new();
            self.was_interrupted = false;
        }
        if self.is_top_level {
            self.activity_monitor.start();
        }

        let mut one_shot_reminder = self.pending_reminder.take();

        if let Some(text) = text {
            let message = self.factory.user(text, (self.now)());
            self.store.append(message);
        }
        let drained = self
            .store
            .drain_interjections(|| self.factory.next_id(), || (self.now)());
        for message in drained {
            self.store.append(message);
        }

        let final_text = loop {
            if self.cancellation.is_cancelled() {
                self.was_interrupted = true;
                break ENGINE_INTERRUPTED_MESSAGE.to_string();
            }

            let outbound = self.build_outbound_messages(one_shot_reminder.take());
            let options = ModelRequestOptions {
                tools: self.tool_definitions(),
                temperature: self.model_config.temperature,
                max_tokens: self.model_config.max_tokens,
                reasoning_effort: self.model_config.reasoning_effort,
                stream: false,
                cancellation: self.cancellation.clone(),
            };
            let response = self.model.send(&outbound, &options).await;

            if response.interrupted {
                self.was_interrupted = true;
                break ENGINE_INTERRUPTED_MESSAGE.to_string();
            }

            if response.tool_calls.is_empty() {
                let message = self.factory.assistant(response.content.clone(), (self.now)());
                self.tokens.add_message_tokens(&message);
                self.store.append(message);
                break response.content;
            }

            let assistant_message = self.factory.assistant_with_tool_calls(
                response.content.clone(),
                response.tool_calls.clone(),
                (self.now)(),
            );
            self.tokens.add_message_tokens(&assistant_message);
            self.store.append(assistant_message);

            self.dispatch_and_record(&response.tool_calls).await;
            // `ToolCycleDetector::record_search_result` stays uncalled here:
            // classifying a tool result as a "hit" or "empty" search is a
            // concrete-tool concern (a `read` result and a `grep` result
            // aren't comparable without knowing which is which), and
            // concrete tools are out of scope for this crate.
            self.cycles.clear_if_broken();

            if self.turn_manager.is_max_duration_exceeded() || self.cancellation.is_cancelled() {
                let reminder = self.factory.system(MAX_DURATION_EXCEEDED_MESSAGE, (self.now)());
                self.tokens.add_message_tokens(&reminder);
                self.store.append(reminder);
                break MAX_DURATION_EXCEEDED_MESSAGE.to_string();
            }
        };

        if self.is_top_level {
            self.activity_monitor.stop();
        }
        final_text
    }

    async fn dispatch_and_record(&mut self, tool_calls: &[relay_protocol::ToolCall]) {
        let ctx = ToolContext::new(self.activity_stream.clone(), self.cancellation.clone());
        let results = {
            let mut orchestrator = Orchestrator {
                registry: &self.tools,
                duplicates: &mut self.duplicates,
                cycles: &mut self.cycles,
                exploratory: &self.exploratory,
                permission: self.permission.as_ref(),
                tool_dispatch: &self.tool_dispatch,
                inject_exploratory_reminders: self.inject_exploratory_reminders,
            };
            orchestrator.dispatch(tool_calls, &ctx).await
        };

        for (call, result) in tool_calls.iter().zip(results.into_iter()) {
            let content = format_tool_result(&result);
            self.tokens.track_tool_result(&call.id, &content);

            if let Some(reminder) = &result.system_reminder {
                if result.system_reminder_persist {
                    let reminder_message = self.factory.system(reminder.clone(), (self.now)());
                    self.tokens.add_message_tokens(&reminder_message);
                    self.store.append(reminder_message);
                } else {
                    self.pending_reminder = Some(reminder.clone());
                }
            }

            let tool_message = self.factory.tool_result(call.id.clone(), content, (self.now)());
            self.tokens.add_message_tokens(&tool_message);
            self.store.append(tool_message);
            self.activity_monitor.record_activity();
        }
    }

    fn build_outbound_messages(&self, one_shot_reminder: Option<String>) -> Vec<Message> {
        let mut outbound = Vec::with_capacity(self.store.message_count() + 1);
        if let Some(reminder) = one_shot_reminder {
            outbound.push(self.factory.system(reminder, (self.now)()).hidden());
        }
        outbound.extend(self.store.messages().iter().cloned());
        outbound
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                requires_confirmation: tool.requires_confirmation(),
            })
            .collect()
    }

    /// Idempotent: cancels the in-flight model request and arms the
    /// cooperative abort signal observed by tool executions. `User`
    /// additionally stages the one-shot "interrupted" reminder for the next
    /// `send_message` call; `Interjection` leaves staged interjections to be
    /// drained normally on the next iteration.
    pub fn interrupt(&mut self, reason: InterruptReason) {
        self.cancellation.cancel();
        self.was_interrupted = true;
        if reason == InterruptReason::User {
            self.pending_reminder = Some(USER_INTERRUPTED_REMINDER.to_string());
        }
    }

    pub fn add_user_interjection(&mut self, text: impl Into<String>) {
        self.store.add_user_interjection(text);
    }

    /// Reserve a slot in the shared delegation call-stack before handing
    /// control to a (out-of-scope) sub-agent tool. Call [`Self::end_delegation`]
    /// when the nested loop returns, whether it succeeded or failed.
    pub fn try_begin_delegation(&self, agent_type: impl Into<String>) -> Result<(), DepthLimitError> {
        self.call_stack.lock().expect("lock poisoned").try_push(agent_type)
    }

    pub fn end_delegation(&self) {
        self.call_stack.lock().expect("lock poisoned").pop();
    }

    pub fn call_stack(&self) -> Arc<Mutex<AgentCallStack>> {
        Arc::clone(&self.call_stack)
    }

    /// Pause this agent's own watchdog while a delegated sub-agent runs, so
    /// the sub-agent's execution time isn't mistaken for a stall.
    pub fn pause_for_delegation(&self) {
        self.activity_monitor.pause();
    }

    pub fn resume_after_delegation(&self, success: bool) {
        self.activity_monitor.resume(success);
    }

    pub fn delegation_context(&mut self) -> &mut DelegationContext {
        &mut self.delegation
    }

    pub fn is_top_level(&self) -> bool {
        self.is_top_level
    }

    pub fn exploratory_streak(&self) -> usize {
        self.exploratory.current_streak()
    }

    /// Whether the text-stream loop detector has tripped since the last
    /// `reset()`. Exposed for diagnostics and tests, mirroring
    /// `exploratory_streak`.
    pub fn text_loop_triggered(&self) -> bool {
        self.text_loop.lock().expect("lock poisoned").is_triggered()
    }

    pub fn activity_stream(&self) -> Arc<ActivityStream> {
        Arc::clone(&self.activity_stream)
    }

    pub fn message_count(&self) -> usize {
        self.store.message_count()
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn current_tokens(&self) -> i32 {
        self.tokens.current_tokens()
    }

    pub fn reset(&mut self) {
        self.store.reset();
        self.tokens.reset();
        self.duplicates.reset();
        self.cycles.reset();
        self.text_loop.lock().expect("lock poisoned").reset();
        self.exploratory.reset();
        self.turn_manager.reset_turn();
        self.was_interrupted = false;
        self.pending_reminder = None;
        self.cancellation = CancellationToken::new();
    }
}

fn wall_clock_millis() -> i64 {
    i64::try_from(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0),
    )
    .unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "engine.test.rs"]
mod tests;
