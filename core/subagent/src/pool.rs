//! Keyed pool of warm sub-agents (C9).

use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use relay_protocol::AgentId;

use crate::config::AgentConfig;

/// A handle to an agent currently held by one caller. The agent itself is
/// opaque to the pool; `agent` is whatever the caller constructed.
pub struct PooledAgent<A> {
    pub agent_id: AgentId,
    pub agent: Arc<A>,
}

struct Entry<A> {
    agent_id: AgentId,
    config: AgentConfig,
    agent: Arc<A>,
    in_use: Arc<AtomicBool>,
    created_at: i64,
}

/// Errors returned instead of blocking: the pool never awaits, callers
/// decide how to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The caller asked for a specific agent-id and it is already held.
    AgentBusy(AgentId),
    /// The caller asked for an agent-id the pool has never seen.
    UnknownAgent(AgentId),
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::AgentBusy(id) => write!(f, "agent '{id}' is busy"),
            PoolError::UnknownAgent(id) => write!(f, "agent '{id}' is not in the pool"),
        }
    }
}

impl std::error::Error for PoolError {}

/// A multiset of warm agents of type `A`, keyed by [`AgentConfig`] identity.
pub struct AgentPool<A> {
    entries: Mutex<Vec<Entry<A>>>,
    next_id: AtomicU64,
}

impl<A> Default for AgentPool<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> AgentPool<A> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Return an idle entry matching `config`, or build a fresh one with
    /// `make` and register it. Either way the returned handle is marked
    /// `in_use` until [`Self::release`] is called with its id.
    pub fn acquire(&self, config: AgentConfig, now: i64, make: impl FnOnce() -> A) -> PooledAgent<A> {
        let key = config.key();
        let mut entries = self.entries.lock().expect("lock poisoned");

        let idle = entries.iter().find(|entry| {
            entry.config.key() == key && !entry.in_use.load(Ordering::SeqCst)
        });
        if let Some(entry) = idle {
            entry.in_use.store(true, Ordering::SeqCst);
            return PooledAgent {
                agent_id: entry.agent_id.clone(),
                agent: Arc::clone(&entry.agent),
            };
        }

        let agent_id = format!("agent-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let agent = Arc::new(make());
        let in_use = Arc::new(AtomicBool::new(true));
        entries.push(Entry {
            agent_id: agent_id.clone(),
            config,
            agent: Arc::clone(&agent),
            in_use,
            created_at: now,
        });
        PooledAgent { agent_id, agent }
    }

    /// Acquire a caller-known agent by id, failing fast if it's already held
    /// rather than silently handing back an idle substitute.
    pub fn acquire_by_id(&self, agent_id: &str) -> Result<PooledAgent<A>, PoolError> {
        let entries = self.entries.lock().expect("lock poisoned");
        let Some(entry) = entries.iter().find(|entry| entry.agent_id == agent_id) else {
            return Err(PoolError::UnknownAgent(agent_id.to_string()));
        };
        if entry.in_use.swap(true, Ordering::SeqCst) {
            return Err(PoolError::AgentBusy(agent_id.to_string()));
        }
        Ok(PooledAgent {
            agent_id: entry.agent_id.clone(),
            agent: Arc::clone(&entry.agent),
        })
    }

    /// Clear the `in_use` lock for `agent_id`, leaving the agent warm in the
    /// pool. Returns `false` if no such entry exists.
    pub fn release(&self, agent_id: &str) -> bool {
        let entries = self.entries.lock().expect("lock poisoned");
        match entries.iter().find(|entry| entry.agent_id == agent_id) {
            Some(entry) => {
                entry.in_use.store(false, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }

    pub fn created_at(&self, agent_id: &str) -> Option<i64> {
        let entries = self.entries.lock().expect("lock poisoned");
        entries
            .iter()
            .find(|entry| entry.agent_id == agent_id)
            .map(|entry| entry.created_at)
    }

    pub fn is_in_use(&self, agent_id: &str) -> Option<bool> {
        let entries = self.entries.lock().expect("lock poisoned");
        entries
            .iter()
            .find(|entry| entry.agent_id == agent_id)
            .map(|entry| entry.in_use.load(Ordering::SeqCst))
    }

    /// Remove every idle entry whose config matches `predicate`, for plugin
    /// hot-reload. In-use entries are never evicted out from under a caller.
    pub fn evict_where(&self, predicate: impl Fn(&AgentConfig) -> bool) -> usize {
        let mut entries = self.entries.lock().expect("lock poisoned");
        let before = entries.len();
        entries.retain(|entry| entry.in_use.load(Ordering::SeqCst) || !predicate(&entry.config));
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::info!(evicted, "evicted idle pooled agents");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "pool.test.rs"]
mod tests;
