//! Repetition and cycle detection across tool calls and streamed text (C4+C5).

mod cycle;
mod duplicate;
mod text_stream;

pub use cycle::CycleKind;
pub use cycle::CycleReport;
pub use cycle::Severity;
pub use cycle::ToolCallHistoryEntry;
pub use cycle::ToolCycleDetector;
pub use duplicate::default_tracked_tools;
pub use duplicate::DuplicateCheck;
pub use duplicate::DuplicateDetector;
pub use text_stream::LoopInfo;
pub use text_stream::PatternMatcher;
pub use text_stream::TextStreamDetector;
