//! Append-only ordered conversation log (C3).

use std::collections::VecDeque;

use relay_protocol::Message;
use relay_protocol::MessageId;

/// The ordered message log for one agent, plus a queue of staged user
/// interjections waiting to be turned into messages before the next model
/// request.
///
/// Invariant I1 (every tool_calls-bearing assistant message is immediately
/// followed, before the next assistant message, by exactly one `tool`
/// message per tool_call_id) is enforced by the Engine, not here — the
/// store only guarantees insertion order and id stability.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    interjections: VecDeque<String>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Remove the message with the given id. Returns `true` if a message
    /// was removed.
    pub fn remove_by_id(&mut self, id: &MessageId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| &m.id != id);
        self.messages.len() != before
    }

    /// Replace the message with the given id in place, preserving its
    /// position. Used for whole-message replacement during tool-call
    /// repair. Returns `true` if a message was found and replaced.
    pub fn replace(&mut self, id: &MessageId, message: Message) -> bool {
        match self.messages.iter().position(|m| &m.id == id) {
            Some(index) => {
                self.messages[index] = message;
                true
            }
            None => false,
        }
    }

    /// Drop the oldest `n` messages (or all of them, if fewer remain).
    pub fn trim_head(&mut self, n: usize) {
        let n = n.min(self.messages.len());
        self.messages.drain(0..n);
    }

    /// Stage a user message to be injected before the next model request.
    pub fn add_user_interjection(&mut self, text: impl Into<String>) {
        self.interjections.push_back(text.into());
    }

    pub fn has_pending_interjections(&self) -> bool {
        !self.interjections.is_empty()
    }

    /// Drain staged interjections, minting an id and timestamp for each via
    /// the supplied callbacks, and return them as `user` messages in the
    /// order they were staged.
    pub fn drain_interjections(
        &mut self,
        mut next_id: impl FnMut() -> MessageId,
        mut now: impl FnMut() -> i64,
    ) -> Vec<Message> {
        self.interjections
            .drain(..)
            .map(|text| Message::user(next_id(), text, now()))
            .collect()
    }

    pub fn reset(&mut self) {
        self.messages.clear();
        self.interjections.clear();
    }
}

#[cfg(test)]
#[path = "store.test.rs"]
mod tests;
