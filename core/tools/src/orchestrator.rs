//! Batch classification and the per-call execution state machine (C8).
//!
//! A batch of tool calls requested by one assistant message is classified
//! once: if every call is concurrency-safe it runs in parallel, otherwise
//! the whole batch runs sequentially in request order. Each call then goes
//! through `validate -> validate_preconditions -> permission gate -> execute
//! -> record -> post-process`, producing exactly one [`ToolResult`] per
//! call, in the same order the calls were given.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::Arc;

use relay_config::ToolDispatchConfig;
use relay_detection::DuplicateDetector;
use relay_detection::ToolCallHistoryEntry;
use relay_detection::ToolCycleDetector;
use relay_protocol::ContextModifier;
use relay_protocol::ErrorType;
use relay_protocol::ToolCall;
use relay_protocol::ToolResult;

use crate::exploratory::ExploratoryReminder;
use crate::exploratory::ExploratoryStreakTracker;
use crate::permission::PermissionDecision;
use crate::permission::PermissionRequester;
use crate::permission::PERMISSION_DENIED_MESSAGE;
use crate::registry::ToolRegistry;
use crate::tool::Tool;
use crate::tool::ToolContext;

/// Stable string distinguishing a call that never ran because the agent was
/// interrupted before reaching it (spec §7).
pub const INTERRUPTED_MESSAGE: &str = "Interrupted before this tool call could run.";

/// Collaborators the dispatch engine needs for one batch. Borrowed rather
/// than owned: callers hold these for the lifetime of one agent turn.
pub struct Orchestrator<'a> {
    pub registry: &'a ToolRegistry,
    pub duplicates: &'a mut DuplicateDetector,
    pub cycles: &'a mut ToolCycleDetector,
    pub exploratory: &'a ExploratoryStreakTracker,
    pub permission: &'a dyn PermissionRequester,
    pub tool_dispatch: &'a ToolDispatchConfig,
    /// Skips exploratory-streak injection for specialized sub-agents.
    pub inject_exploratory_reminders: bool,
}

impl<'a> Orchestrator<'a> {
    /// Run a full batch, in request order, choosing parallel or sequential
    /// execution per the batch's concurrency classification.
    pub async fn dispatch(&mut self, calls: &[ToolCall], ctx: &ToolContext) -> Vec<ToolResult> {
        if calls.is_empty() {
            return Vec::new();
        }

        let all_safe = calls
            .iter()
            .all(|call| self.is_concurrency_safe(call));

        if all_safe && self.tool_dispatch.parallel_tools {
            self.dispatch_parallel(calls, ctx).await
        } else {
            self.dispatch_sequential(calls, ctx).await
        }
    }

    fn is_concurrency_safe(&self, call: &ToolCall) -> bool {
        match self.registry.get(&call.name) {
            Some(tool) => tool.is_concurrency_safe_for(&call.arguments),
            // An unknown tool can't run at all, so it can't block the batch
            // from classifying as parallel; its slot will just fail fast.
            None => true,
        }
    }

    async fn dispatch_sequential(&mut self, calls: &[ToolCall], ctx: &ToolContext) -> Vec<ToolResult> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            if ctx.cancellation.is_cancelled() {
                results.push(ToolResult::failure(
                    INTERRUPTED_MESSAGE,
                    ErrorType::Interrupted,
                    call.name.clone(),
                    None,
                ));
                continue;
            }
            results.push(self.run_one(call, ctx).await);
        }
        results
    }

    /// Parallel execution preserves the caller's ordering in the returned
    /// vector even though completion order is unconstrained: each task is
    /// tagged with its index and results are re-sorted before returning.
    ///
    /// The `validate -> duplicate check -> validate_preconditions ->
    /// permission gate` stages run synchronously, in request order, before
    /// any task is spawned: only the declared-safe-concurrent `execute`
    /// calls actually run concurrently. This also lets a same-batch repeat
    /// of an identical call be blocked the moment the first one is admitted,
    /// the same way the sequential path blocks it via `duplicates.check`.
    async fn dispatch_parallel(&mut self, calls: &[ToolCall], ctx: &ToolContext) -> Vec<ToolResult> {
        let mut ordered: BTreeMap<usize, (ToolCall, ToolResult)> = BTreeMap::new();
        let mut tasks = Vec::with_capacity(calls.len());
        let mut admitted_signatures: HashSet<String> = HashSet::new();

        for (index, call) in calls.iter().enumerate() {
            let signature = relay_protocol::signature::signature(&call.name, &call.arguments);
            if !admitted_signatures.insert(signature) {
                ordered.insert(
                    index,
                    (
                        call.clone(),
                        ToolResult::failure(
                            format!(
                                "duplicate call blocked: an identical '{}' call is already running in this batch",
                                call.name
                            ),
                            ErrorType::ValidationError,
                            call.name.clone(),
                            None,
                        ),
                    ),
                );
                continue;
            }

            match self.pre_execute(call).await {
                Err(terminal) => {
                    ordered.insert(index, (call.clone(), terminal));
                }
                Ok(tool) => {
                    let call = call.clone();
                    let ctx = ctx.clone();
                    tasks.push(tokio::spawn(async move {
                        let result = tool.execute(&call, &ctx).await;
                        (index, call, result)
                    }));
                }
            }
        }

        for task in tasks {
            match task.await {
                Ok((index, call, result)) => {
                    ordered.insert(index, (call, result));
                }
                Err(join_error) => {
                    tracing::error!(error = %join_error, "tool task panicked");
                }
            }
        }

        ordered
            .into_values()
            .map(|(call, result)| self.record_and_annotate(&call, result))
            .collect()
    }

    /// The full single-call state machine: validate, gate on permission,
    /// execute, then record and annotate the outcome.
    async fn run_one(&mut self, call: &ToolCall, ctx: &ToolContext) -> ToolResult {
        let tool = match self.pre_execute(call).await {
            Ok(tool) => tool,
            Err(terminal) => return terminal,
        };
        let result = tool.execute(call, ctx).await;
        self.record_and_annotate(call, result)
    }

    /// The pre-execute state machine shared by the sequential and parallel
    /// dispatch paths: registry lookup, argument validation, the duplicate
    /// check, precondition validation, and the permission gate. Returns the
    /// tool to execute on success, or the terminal result to return as-is.
    async fn pre_execute(&self, call: &ToolCall) -> Result<Arc<dyn Tool>, ToolResult> {
        let Some(tool) = self.registry.get(&call.name) else {
            return Err(unknown_tool_result(call));
        };

        let validation = tool.validate(&call.arguments);
        if !validation.is_valid() {
            return Err(ToolResult::failure(
                describe_validation(&validation),
                ErrorType::ValidationError,
                call.name.clone(),
                None,
            ));
        }

        let duplicate = self.duplicates.check(&call.name, &call.arguments);
        if duplicate.should_block {
            return Err(ToolResult::failure(
                duplicate.message.unwrap_or_else(|| "duplicate call blocked".to_string()),
                ErrorType::ValidationError,
                call.name.clone(),
                None,
            ));
        }

        let preconditions = tool.validate_preconditions(&call.arguments);
        if !preconditions.is_valid() {
            return Err(ToolResult::failure(
                describe_validation(&preconditions),
                ErrorType::ValidationError,
                call.name.clone(),
                None,
            ));
        }

        if tool.requires_confirmation() {
            match self.permission.request(call).await {
                PermissionDecision::Deny => {
                    return Err(ToolResult::failure(
                        PERMISSION_DENIED_MESSAGE,
                        ErrorType::PermissionError,
                        call.name.clone(),
                        None,
                    ));
                }
                PermissionDecision::Interrupted => {
                    return Err(ToolResult::failure(
                        INTERRUPTED_MESSAGE,
                        ErrorType::Interrupted,
                        call.name.clone(),
                        None,
                    ));
                }
                PermissionDecision::Allow => {}
            }
        }

        Ok(tool)
    }

    /// Update the duplicate/cycle/exploratory trackers with a completed
    /// call's outcome and attach any reminder they produced.
    fn record_and_annotate(&mut self, call: &ToolCall, mut result: ToolResult) -> ToolResult {
        if !result.success {
            return result;
        }

        let timestamp = i64::try_from(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
        )
        .unwrap_or(i64::MAX);

        self.duplicates.record_call(&call.name, &call.arguments, timestamp);

        let file_hashes = result.context_modifier.as_ref().and_then(|modifier| match modifier {
            ContextModifier::FileRead { path, content } => {
                let mut map = BTreeMap::new();
                map.insert(path.clone(), hash_file_content(content));
                Some(map)
            }
            ContextModifier::PermissionGranted { .. } | ContextModifier::SkillAllowedTools { .. } => None,
        });

        let entry = ToolCallHistoryEntry {
            signature: relay_protocol::signature::signature(&call.name, &call.arguments),
            tool_name: call.name.clone(),
            timestamp,
            file_hashes,
        };
        if let Some(report) = self.cycles.record_call(entry) {
            result = result.with_reminder(report.message);
        }

        let breaks_streak = self
            .registry
            .get(&call.name)
            .map(|tool| tool.breaks_exploratory_streak())
            .unwrap_or(true);
        if self.inject_exploratory_reminders {
            if let Some(reminder) = self.exploratory.record(breaks_streak) {
                result = attach_exploratory_reminder(result, reminder);
            }
        } else {
            self.exploratory.reset();
        }

        result
    }
}

fn attach_exploratory_reminder(result: ToolResult, reminder: ExploratoryReminder) -> ToolResult {
    match (&result.system_reminder, reminder) {
        (None, _) => result.with_reminder(reminder.message()),
        // A cycle-detector reminder already landed this call; don't clobber
        // it, just prepend the exploratory nudge.
        (Some(existing), _) => {
            let combined = format!("{}\n\n{existing}", reminder.message());
            let persist = result.system_reminder_persist;
            let mut result = result;
            result.system_reminder = Some(combined);
            result.system_reminder_persist = persist;
            result
        }
    }
}

fn unknown_tool_result(call: &ToolCall) -> ToolResult {
    ToolResult::failure(
        format!("no tool named '{}' is registered", call.name),
        ErrorType::ValidationError,
        call.name.clone(),
        None,
    )
}

fn describe_validation(validation: &relay_protocol::ValidationResult) -> String {
    match validation {
        relay_protocol::ValidationResult::Valid => String::new(),
        relay_protocol::ValidationResult::Invalid { errors } => errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; "),
    }
}

/// Repair a malformed `tool_calls` payload: retried up to
/// `tool_call_repair_attempts` times by the caller, which re-asks the model
/// for corrected JSON and feeds it back in. This helper only decides
/// whether another attempt is allowed and formats the repair prompt.
pub struct ToolCallRepair {
    attempts_made: i32,
    max_attempts: i32,
}

impl ToolCallRepair {
    pub fn new(max_attempts: i32) -> Self {
        Self {
            attempts_made: 0,
            max_attempts,
        }
    }

    pub fn can_retry(&self) -> bool {
        self.attempts_made < self.max_attempts
    }

    /// Record one attempt and produce the prompt asking the model to
    /// resubmit valid `tool_calls` JSON. Returns `None` once attempts are
    /// exhausted.
    pub fn next_prompt(&mut self, parse_error: &str) -> Option<String> {
        if !self.can_retry() {
            return None;
        }
        self.attempts_made += 1;
        Some(format!(
            "Your tool_calls payload could not be parsed: {parse_error}. Resubmit valid JSON."
        ))
    }

    pub fn attempts_made(&self) -> i32 {
        self.attempts_made
    }
}

/// Hash a file's content the same way `relay-context`'s `TokenManager` hashes
/// content for its own duplicate index, so a repeated read of unchanged
/// content produces the same digest.
fn hash_file_content(content: &str) -> String {
    use sha1::Digest;
    let mut hasher = sha1::Sha1::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
#[path = "orchestrator.test.rs"]
mod tests;
