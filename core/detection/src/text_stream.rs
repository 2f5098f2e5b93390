//! Pattern-based loop detection over a rolling buffer of streamed text.

/// What a triggered pattern reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopInfo {
    pub pattern_name: String,
    pub message: String,
}

/// An opaque pattern matcher: given the accumulated buffer, report a loop
/// if one is detected.
pub type PatternMatcher = Box<dyn Fn(&str) -> Option<LoopInfo> + Send + Sync>;

/// Concatenates streamed chunks into a rolling buffer and, after a warmup
/// period, runs the configured matchers at a fixed character interval. The
/// first matcher to trigger wins; after that, checks halt until `reset()`.
pub struct TextStreamDetector {
    buffer: String,
    warmup_chars: usize,
    check_interval_chars: usize,
    chars_since_check: usize,
    patterns: Vec<PatternMatcher>,
    triggered: bool,
}

impl TextStreamDetector {
    pub fn new(warmup_chars: usize, check_interval_chars: usize, patterns: Vec<PatternMatcher>) -> Self {
        Self {
            buffer: String::new(),
            warmup_chars,
            check_interval_chars: check_interval_chars.max(1),
            chars_since_check: 0,
            patterns,
            triggered: false,
        }
    }

    /// Feed one streamed chunk. Returns the first triggered [`LoopInfo`]
    /// since the last `reset()`, or `None`.
    pub fn push_chunk(&mut self, chunk: &str) -> Option<LoopInfo> {
        if self.triggered {
            return None;
        }
        self.buffer.push_str(chunk);
        self.chars_since_check += chunk.chars().count();

        if self.buffer.chars().count() < self.warmup_chars {
            return None;
        }
        if self.chars_since_check < self.check_interval_chars {
            return None;
        }
        self.chars_since_check = 0;

        for pattern in &self.patterns {
            if let Some(info) = pattern(&self.buffer) {
                self.triggered = true;
                return Some(info);
            }
        }
        None
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.chars_since_check = 0;
        self.triggered = false;
    }
}

#[cfg(test)]
#[path = "text_stream.test.rs"]
mod tests;
