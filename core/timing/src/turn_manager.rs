//! Per-turn wall-clock budget (C7).
//!
//! Consulted cooperatively by the Engine between model iterations and by
//! the Orchestrator before dispatching the next tool call. It does not
//! preempt anything — only signals.

use std::time::Duration;
use std::time::Instant;

pub struct TurnManager {
    turn_start: Option<Instant>,
    max_duration: Option<Duration>,
}

impl Default for TurnManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnManager {
    pub fn new() -> Self {
        Self {
            turn_start: None,
            max_duration: None,
        }
    }

    pub fn start_turn(&mut self) {
        self.turn_start = Some(Instant::now());
    }

    pub fn reset_turn(&mut self) {
        self.turn_start = None;
    }

    pub fn elapsed(&self) -> Duration {
        self.turn_start.map(|start| start.elapsed()).unwrap_or_default()
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed().as_millis()
    }

    pub fn elapsed_sec(&self) -> u64 {
        self.elapsed().as_secs()
    }

    pub fn elapsed_min(&self) -> f64 {
        self.elapsed().as_secs_f64() / 60.0
    }

    pub fn set_max_duration(&mut self, minutes: f64) {
        self.max_duration = Some(Duration::from_secs_f64((minutes * 60.0).max(0.0)));
    }

    pub fn clear_max_duration(&mut self) {
        self.max_duration = None;
    }

    pub fn is_max_duration_exceeded(&self) -> bool {
        match self.max_duration {
            Some(max) => self.elapsed() >= max,
            None => false,
        }
    }

    /// `None` if no max duration is set.
    pub fn get_remaining_minutes(&self) -> Option<f64> {
        self.max_duration.map(|max| {
            let remaining = max.saturating_sub(self.elapsed());
            remaining.as_secs_f64() / 60.0
        })
    }
}

#[cfg(test)]
#[path = "turn_manager.test.rs"]
mod tests;
