//! Tool-call cycle detection: exact duplicates, repeated file access,
//! similar calls, low search hit-rate, and empty search streaks.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::path::PathBuf;

use relay_config::DetectionConfig;

/// One recorded tool invocation, bounded history of `MAX_TOOL_HISTORY`.
#[derive(Debug, Clone)]
pub struct ToolCallHistoryEntry {
    pub signature: String,
    pub tool_name: String,
    pub timestamp: i64,
    /// Content hash of each file this call touched, if any (e.g. a `read`).
    pub file_hashes: Option<BTreeMap<PathBuf, String>>,
}

impl ToolCallHistoryEntry {
    fn primary_file(&self) -> Option<(&PathBuf, &String)> {
        self.file_hashes.as_ref().and_then(|map| map.iter().next())
    }
}

/// Which cycle condition fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleKind {
    ExactDuplicate,
    RepeatedFileAccess,
    SimilarCalls,
    LowHitRate,
    EmptyStreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A detected cycle, ready to become an orchestrator-facing reminder.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub kind: CycleKind,
    pub severity: Severity,
    pub is_valid_repeat: bool,
    pub message: String,
}

/// Tracks recent tool calls and search outcomes to surface looping behavior.
pub struct ToolCycleDetector {
    cycle_threshold: usize,
    repeated_file_threshold: usize,
    similar_call_threshold: usize,
    min_searches_for_hit_rate: usize,
    hit_rate_threshold: f32,
    empty_streak_threshold: usize,
    cycle_break_threshold: usize,
    max_history: usize,

    history: VecDeque<ToolCallHistoryEntry>,
    search_count: usize,
    search_hits: usize,
    empty_streak: usize,
}

impl ToolCycleDetector {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            cycle_threshold: config.cycle_threshold,
            repeated_file_threshold: config.repeated_file_threshold,
            similar_call_threshold: config.similar_call_threshold,
            min_searches_for_hit_rate: config.min_searches_for_hit_rate,
            hit_rate_threshold: config.hit_rate_threshold,
            empty_streak_threshold: config.empty_streak_threshold,
            cycle_break_threshold: config.cycle_break_threshold,
            max_history: config.max_tool_history,
            history: VecDeque::new(),
            search_count: 0,
            search_hits: 0,
            empty_streak: 0,
        }
    }

    /// Record one invocation and run the per-invocation detections in
    /// priority order, returning the first that fires.
    pub fn record_call(&mut self, entry: ToolCallHistoryEntry) -> Option<CycleReport> {
        self.history.push_back(entry.clone());
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }

        if let Some(report) = self.check_exact_duplicate(&entry) {
            return Some(report);
        }
        if let Some(report) = self.check_repeated_file_access(&entry) {
            return Some(report);
        }
        self.check_similar_calls(&entry)
    }

    fn check_exact_duplicate(&self, entry: &ToolCallHistoryEntry) -> Option<CycleReport> {
        let count = self
            .history
            .iter()
            .filter(|e| e.signature == entry.signature)
            .count();
        if count < self.cycle_threshold {
            return None;
        }
        let is_valid_repeat = self.is_valid_repeat(entry);
        Some(CycleReport {
            kind: CycleKind::ExactDuplicate,
            severity: if is_valid_repeat { Severity::Low } else { Severity::High },
            is_valid_repeat,
            message: format!(
                "{} has been called with identical arguments {count} times",
                entry.tool_name
            ),
        })
    }

    /// A repeat read is "valid" if the file's content hash changed since the
    /// previous read of the same file — i.e. the repeat observed new state.
    fn is_valid_repeat(&self, entry: &ToolCallHistoryEntry) -> bool {
        let Some((path, hash)) = entry.primary_file() else {
            return false;
        };
        self.history
            .iter()
            .rev()
            .skip(1)
            .filter_map(|e| e.primary_file().map(|(p, h)| (p, h)))
            .find(|(p, _)| *p == path)
            .is_some_and(|(_, prior_hash)| prior_hash != hash)
    }

    fn check_repeated_file_access(&self, entry: &ToolCallHistoryEntry) -> Option<CycleReport> {
        let (path, _) = entry.primary_file()?;
        let count = self
            .history
            .iter()
            .filter(|e| e.primary_file().is_some_and(|(p, _)| p == path))
            .count();
        if count < self.repeated_file_threshold {
            return None;
        }
        Some(CycleReport {
            kind: CycleKind::RepeatedFileAccess,
            severity: Severity::Medium,
            is_valid_repeat: false,
            message: format!("{} has been accessed {count} times", path.display()),
        })
    }

    fn check_similar_calls(&self, entry: &ToolCallHistoryEntry) -> Option<CycleReport> {
        let count = self
            .history
            .iter()
            .filter(|e| e.tool_name == entry.tool_name && jaccard_similarity(&e.signature, &entry.signature) >= 0.6)
            .count();
        if count < self.similar_call_threshold {
            return None;
        }
        Some(CycleReport {
            kind: CycleKind::SimilarCalls,
            severity: Severity::Medium,
            is_valid_repeat: false,
            message: format!("{count} similar calls to {} detected", entry.tool_name),
        })
    }

    /// Global detection: run after each search-tool result.
    pub fn record_search_result(&mut self, is_hit: bool, is_empty: bool) -> Option<CycleReport> {
        self.search_count += 1;
        if is_hit {
            self.search_hits += 1;
        }
        if is_empty {
            self.empty_streak += 1;
        } else {
            self.empty_streak = 0;
        }

        if self.empty_streak >= self.empty_streak_threshold {
            return Some(CycleReport {
                kind: CycleKind::EmptyStreak,
                severity: Severity::Medium,
                is_valid_repeat: false,
                message: format!("{} consecutive empty search results", self.empty_streak),
            });
        }

        if self.search_count >= self.min_searches_for_hit_rate {
            let hit_rate = self.search_hits as f32 / self.search_count as f32;
            if hit_rate < self.hit_rate_threshold {
                return Some(CycleReport {
                    kind: CycleKind::LowHitRate,
                    severity: Severity::Low,
                    is_valid_repeat: false,
                    message: format!("search hit rate is {:.0}%", hit_rate * 100.0),
                });
            }
        }
        None
    }

    /// If the last `CYCLE_BREAK_THRESHOLD` signatures are all distinct, the
    /// agent has escaped the loop: clear history and return `true`.
    pub fn clear_if_broken(&mut self) -> bool {
        if self.history.len() < self.cycle_break_threshold {
            return false;
        }
        let tail: Vec<&str> = self
            .history
            .iter()
            .rev()
            .take(self.cycle_break_threshold)
            .map(|e| e.signature.as_str())
            .collect();
        let distinct: HashSet<&str> = tail.iter().copied().collect();
        if distinct.len() != tail.len() {
            return false;
        }
        self.history.clear();
        self.search_count = 0;
        self.search_hits = 0;
        self.empty_streak = 0;
        true
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.search_count = 0;
        self.search_hits = 0;
        self.empty_streak = 0;
    }
}

/// Jaccard similarity of two signatures' param-set tokens (everything after
/// the tool name, split on the `" | "` separator).
fn jaccard_similarity(a: &str, b: &str) -> f32 {
    let set_a: HashSet<&str> = a.split(" | ").skip(1).collect();
    let set_b: HashSet<&str> = b.split(" | ").skip(1).collect();
    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}

#[cfg(test)]
#[path = "cycle.test.rs"]
mod tests;
