use super::*;
use relay_config::DetectionConfig;

fn entry(signature: &str, tool_name: &str, timestamp: i64) -> ToolCallHistoryEntry {
    ToolCallHistoryEntry {
        signature: signature.to_string(),
        tool_name: tool_name.to_string(),
        timestamp,
        file_hashes: None,
    }
}

fn read_entry(signature: &str, timestamp: i64, path: &str, hash: &str) -> ToolCallHistoryEntry {
    let mut map = BTreeMap::new();
    map.insert(PathBuf::from(path), hash.to_string());
    ToolCallHistoryEntry {
        signature: signature.to_string(),
        tool_name: "read".to_string(),
        timestamp,
        file_hashes: Some(map),
    }
}

fn detector() -> ToolCycleDetector {
    ToolCycleDetector::new(&DetectionConfig::default())
}

#[test]
fn exact_duplicate_fires_at_threshold() {
    let mut detector = detector();
    let sig = "read | file_path:a.txt";
    assert!(detector.record_call(entry(sig, "read", 0)).is_none());
    assert!(detector.record_call(entry(sig, "read", 1)).is_none());
    let report = detector.record_call(entry(sig, "read", 2)).unwrap();
    assert_eq!(report.kind, CycleKind::ExactDuplicate);
    assert_eq!(report.severity, Severity::High);
}

#[test]
fn changed_file_hash_marks_valid_repeat() {
    let mut detector = detector();
    let sig = "read | file_path:a.txt";
    assert!(detector.record_call(read_entry(sig, 0, "a.txt", "hash1")).is_none());
    assert!(detector.record_call(read_entry(sig, 1, "a.txt", "hash1")).is_none());
    let report = detector.record_call(read_entry(sig, 2, "a.txt", "hash2")).unwrap();
    assert!(report.is_valid_repeat);
    assert_eq!(report.severity, Severity::Low);
}

#[test]
fn repeated_file_access_fires_across_distinct_signatures() {
    let mut detector = detector();
    detector.record_call(read_entry("read | file_path:a.txt | offset:0", 0, "a.txt", "h"));
    detector.record_call(read_entry("read | file_path:a.txt | offset:1", 1, "a.txt", "h"));
    detector.record_call(read_entry("read | file_path:a.txt | offset:2", 2, "a.txt", "h"));
    let report = detector.record_call(read_entry("read | file_path:a.txt | offset:3", 3, "a.txt", "h")).unwrap();
    assert_eq!(report.kind, CycleKind::RepeatedFileAccess);
}

#[test]
fn similar_calls_detected_by_jaccard_overlap() {
    let mut detector = detector();
    let sig1 = "grep | pattern:foo | path:src";
    let sig2 = "grep | pattern:foo | path:lib";
    let sig3 = "grep | pattern:foo | path:tests";
    assert!(detector.record_call(entry(sig1, "grep", 0)).is_none());
    assert!(detector.record_call(entry(sig2, "grep", 1)).is_none());
    let report = detector.record_call(entry(sig3, "grep", 2)).unwrap();
    assert_eq!(report.kind, CycleKind::SimilarCalls);
}

#[test]
fn low_hit_rate_detected_after_minimum_searches() {
    let mut detector = detector();
    let min_searches = DetectionConfig::default().min_searches_for_hit_rate;
    let mut last = None;
    for i in 0..min_searches {
        // Mix non-empty misses so the empty-streak detector never fires first.
        last = detector.record_search_result(false, i % 2 == 0);
    }
    assert_eq!(last.unwrap().kind, CycleKind::LowHitRate);
}

#[test]
fn empty_streak_detected() {
    let mut detector = detector();
    let threshold = DetectionConfig::default().empty_streak_threshold;
    let mut last = None;
    for _ in 0..threshold {
        last = detector.record_search_result(false, true);
    }
    assert_eq!(last.unwrap().kind, CycleKind::EmptyStreak);
}

#[test]
fn clear_if_broken_requires_all_distinct_tail() {
    let mut detector = detector();
    let threshold = DetectionConfig::default().cycle_break_threshold;
    for i in 0..threshold {
        detector.record_call(entry(&format!("read | file_path:{i}.txt"), "read", i as i64));
    }
    assert!(detector.clear_if_broken());
}

#[test]
fn clear_if_broken_false_when_tail_has_repeats() {
    let mut detector = detector();
    let sig = "read | file_path:a.txt";
    let threshold = DetectionConfig::default().cycle_break_threshold;
    for i in 0..threshold {
        detector.record_call(entry(sig, "read", i as i64));
    }
    assert!(!detector.clear_if_broken());
}
