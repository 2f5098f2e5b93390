//! Wall-clock progress watchdog with nestable pause/resume (C6).

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

use tokio::task::JoinHandle;
use tokio::time;

/// Safety ceiling on nested `pause()` calls. Exceeding it resets the
/// counter and logs, rather than corrupting future `resume()` accounting.
const MAX_PAUSE_COUNT: u32 = 10;

struct State {
    last_activity: Instant,
    started: bool,
    stopped: bool,
    /// Set once `on_timeout` has fired for the current stall; cleared by
    /// the next `record_activity()` so the watchdog doesn't refire on every
    /// tick while the agent remains stuck.
    fired: bool,
}

/// Fires `on_timeout` if no [`ActivityMonitor::record_activity`] call has
/// occurred within `timeout`. Pausing is reference-counted so arbitrarily
/// nested delegations (agent -> sub-agent -> sub-sub-agent) can suspend the
/// watchdog without corrupting each other's accounting.
pub struct ActivityMonitor {
    state: Arc<Mutex<State>>,
    pause_count: Arc<AtomicU32>,
    timeout: Duration,
    check_interval: Duration,
    on_timeout: Arc<dyn Fn() + Send + Sync>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ActivityMonitor {
    pub fn new(
        timeout: Duration,
        check_interval: Duration,
        on_timeout: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                last_activity: Instant::now(),
                started: false,
                stopped: false,
                fired: false,
            })),
            pause_count: Arc::new(AtomicU32::new(0)),
            timeout,
            check_interval,
            on_timeout: Arc::new(on_timeout),
            task: Mutex::new(None),
        }
    }

    /// Start (or restart) the watchdog. Spawns a background check loop at
    /// `check_interval` cadence.
    pub fn start(&self) {
        {
            let mut state = self.state.lock().expect("lock poisoned");
            state.started = true;
            state.stopped = false;
            state.last_activity = Instant::now();
            state.fired = false;
        }

        let state = self.state.clone();
        let pause_count = self.pause_count.clone();
        let timeout = self.timeout;
        let on_timeout = self.on_timeout.clone();
        let mut interval = time::interval(self.check_interval);

        let handle = tokio::spawn(async move {
            loop {
                interval.tick().await;
                let mut guard = state.lock().expect("lock poisoned");
                if guard.stopped {
                    break;
                }
                if pause_count.load(Ordering::Acquire) > 0 || guard.fired {
                    continue;
                }
                if guard.last_activity.elapsed() >= timeout {
                    guard.fired = true;
                    drop(guard);
                    on_timeout();
                }
            }
        });

        *self.task.lock().expect("lock poisoned") = Some(handle);
    }

    pub fn stop(&self) {
        self.state.lock().expect("lock poisoned").stopped = true;
        if let Some(handle) = self.task.lock().expect("lock poisoned").take() {
            handle.abort();
        }
    }

    /// Increment the pause count. Safety-capped at [`MAX_PAUSE_COUNT`]; on
    /// overflow the counter resets to 0 and an error is logged rather than
    /// letting it grow unbounded.
    pub fn pause(&self) {
        let previous = self.pause_count.fetch_add(1, Ordering::AcqRel);
        if previous + 1 > MAX_PAUSE_COUNT {
            self.pause_count.store(0, Ordering::Release);
            tracing::error!(
                limit = MAX_PAUSE_COUNT,
                "activity monitor pause count exceeded safety limit; resetting"
            );
        }
    }

    /// Decrement the pause count, floored at 0. On the transition to 0: if
    /// `success` the clock resets to now; otherwise the prior timestamp is
    /// preserved so a stall that merely delegated unsuccessfully isn't hidden.
    pub fn resume(&self, success: bool) {
        loop {
            let current = self.pause_count.load(Ordering::Acquire);
            if current == 0 {
                return;
            }
            let next = current - 1;
            if self
                .pause_count
                .compare_exchange(current, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                if next == 0 && success {
                    self.state.lock().expect("lock poisoned").last_activity = Instant::now();
                }
                return;
            }
        }
    }

    pub fn record_activity(&self) {
        let mut state = self.state.lock().expect("lock poisoned");
        state.last_activity = Instant::now();
        state.fired = false;
    }

    /// `(pauseCount == 0) ∧ started ∧ ¬stopped`.
    pub fn is_active(&self) -> bool {
        let state = self.state.lock().expect("lock poisoned");
        self.pause_count.load(Ordering::Acquire) == 0 && state.started && !state.stopped
    }

    pub fn pause_count(&self) -> u32 {
        self.pause_count.load(Ordering::Acquire)
    }
}

impl Drop for ActivityMonitor {
    fn drop(&mut self) {
        if let Some(handle) = self.task.lock().expect("lock poisoned").take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "activity_monitor.test.rs"]
mod tests;
