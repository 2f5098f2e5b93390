use super::*;
use serde_json::json;

fn args(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect()
}

#[test]
fn untracked_tool_is_never_duplicate() {
    let detector = DuplicateDetector::with_defaults(100);
    let result = detector.check("write", &args(&[("file_path", json!("a.txt"))]));
    assert!(!result.is_duplicate);
}

#[test]
fn unseen_signature_is_not_duplicate() {
    let detector = DuplicateDetector::with_defaults(100);
    let result = detector.check("read", &args(&[("file_path", json!("a.txt"))]));
    assert!(!result.is_duplicate);
}

#[test]
fn same_turn_repeat_is_blocked() {
    let mut detector = DuplicateDetector::with_defaults(100);
    let a = args(&[("file_path", json!("a.txt"))]);
    detector.record_call("read", &a, 0);
    let result = detector.check("read", &a);
    assert!(result.is_duplicate);
    assert!(result.should_block);
}

#[test]
fn cross_turn_repeat_is_advisory_only() {
    let mut detector = DuplicateDetector::with_defaults(100);
    let a = args(&[("file_path", json!("a.txt"))]);
    detector.record_call("read", &a, 0);
    detector.next_turn();
    let result = detector.check("read", &a);
    assert!(result.is_duplicate);
    assert!(!result.should_block);
    assert!(result.message.unwrap().contains("turn 0"));
}

#[test]
fn eviction_keeps_history_within_capacity() {
    let mut detector = DuplicateDetector::with_defaults(2);
    detector.record_call("read", &args(&[("file_path", json!("a.txt"))]), 0);
    detector.record_call("read", &args(&[("file_path", json!("b.txt"))]), 1);
    detector.record_call("read", &args(&[("file_path", json!("c.txt"))]), 2);
    // oldest (a.txt at ts 0) should have been evicted
    let result = detector.check("read", &args(&[("file_path", json!("a.txt"))]));
    assert!(!result.is_duplicate);
}

#[test]
fn reset_clears_history_and_turn() {
    let mut detector = DuplicateDetector::with_defaults(100);
    detector.record_call("read", &args(&[("file_path", json!("a.txt"))]), 0);
    detector.next_turn();
    detector.reset();
    assert_eq!(detector.current_turn(), 0);
    let result = detector.check("read", &args(&[("file_path", json!("a.txt"))]));
    assert!(!result.is_duplicate);
}
