use super::*;

fn repeated_word_pattern() -> PatternMatcher {
    Box::new(|text: &str| {
        if text.matches("loop ").count() >= 3 {
            Some(LoopInfo {
                pattern_name: "repeated_word".to_string(),
                message: "detected repeated word".to_string(),
            })
        } else {
            None
        }
    })
}

#[test]
fn does_not_trigger_before_warmup() {
    let mut detector = TextStreamDetector::new(50, 1, vec![repeated_word_pattern()]);
    let result = detector.push_chunk("loop loop loop ");
    assert!(result.is_none());
}

#[test]
fn triggers_once_pattern_matches_after_warmup() {
    let mut detector = TextStreamDetector::new(5, 1, vec![repeated_word_pattern()]);
    let result = detector.push_chunk("loop loop loop loop ");
    assert!(result.is_some());
    assert_eq!(result.unwrap().pattern_name, "repeated_word");
}

#[test]
fn only_fires_once_per_cycle() {
    let mut detector = TextStreamDetector::new(5, 1, vec![repeated_word_pattern()]);
    assert!(detector.push_chunk("loop loop loop loop ").is_some());
    assert!(detector.push_chunk("more text").is_none());
    assert!(detector.is_triggered());
}

#[test]
fn reset_allows_retriggering() {
    let mut detector = TextStreamDetector::new(5, 1, vec![repeated_word_pattern()]);
    assert!(detector.push_chunk("loop loop loop loop ").is_some());
    detector.reset();
    assert!(!detector.is_triggered());
    assert!(detector.push_chunk("loop loop loop loop ").is_some());
}

#[test]
fn respects_check_interval() {
    let mut detector = TextStreamDetector::new(0, 100, vec![repeated_word_pattern()]);
    // Warmed up immediately, but interval of 100 chars means this short
    // chunk shouldn't trigger a check yet even though the pattern matches.
    let result = detector.push_chunk("loop loop loop ");
    assert!(result.is_none());
}
