//! Typed pub/sub for agent lifecycle events (C1).
//!
//! Delivery is best-effort and fire-and-forget: `emit` invokes every
//! matching handler synchronously, in registration order, on the emitting
//! task. A handler that panics is caught and logged rather than propagated,
//! so one broken subscriber cannot corrupt the emitting call.

use std::panic::AssertUnwindSafe;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use relay_protocol::ActivityEvent;
use relay_protocol::EventKind;

/// Opaque handle returned by [`ActivityStream::subscribe`], usable with
/// [`ActivityStream::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// What a subscriber wants to hear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// Only events of this kind.
    Kind(EventKind),
    /// Every event ("*").
    All,
}

type Handler = Box<dyn Fn(&ActivityEvent) + Send + Sync>;

struct Subscriber {
    id: SubscriptionId,
    topic: Topic,
    handler: Handler,
}

/// A process-local event bus. Owned and injected explicitly by whatever
/// constructs an agent; this crate does not expose a process-wide global.
pub struct ActivityStream {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl Default for ActivityStream {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityStream {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register a handler for `topic`. Returns a token that can later be
    /// passed to [`Self::unsubscribe`].
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> SubscriptionId
    where
        F: Fn(&ActivityEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut subscribers = self.subscribers.lock().expect("lock poisoned");
        subscribers.push(Subscriber {
            id,
            topic,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a previously registered handler. A no-op if `id` is unknown
    /// (already unsubscribed, or from a different stream).
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subscribers = self.subscribers.lock().expect("lock poisoned");
        subscribers.retain(|s| s.id != id);
    }

    /// Dispatch `event` to every matching handler in registration order.
    /// Handler panics are caught and logged, never propagated to the caller.
    pub fn emit(&self, event: ActivityEvent) {
        let subscribers = self.subscribers.lock().expect("lock poisoned");
        for subscriber in subscribers.iter() {
            let matches = match subscriber.topic {
                Topic::All => true,
                Topic::Kind(kind) => kind == event.kind,
            };
            if !matches {
                continue;
            }
            let handler = &subscriber.handler;
            let result = std::panic::catch_unwind(AssertUnwindSafe(|| handler(&event)));
            if result.is_err() {
                tracing::error!(
                    kind = %event.kind,
                    subscription_id = subscriber.id.0,
                    "activity stream handler panicked"
                );
            }
        }
    }

    /// Number of currently registered subscribers, for diagnostics/tests.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().expect("lock poisoned").len()
    }
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
