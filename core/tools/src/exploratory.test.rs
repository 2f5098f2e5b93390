use super::*;

#[test]
fn fires_gentle_reminder_at_threshold() {
    let tracker = ExploratoryStreakTracker::new(3, 6);
    assert_eq!(tracker.record(false), None);
    assert_eq!(tracker.record(false), None);
    assert_eq!(tracker.record(false), Some(ExploratoryReminder::Gentle));
    assert_eq!(tracker.current_streak(), 3);
}

#[test]
fn fires_stern_reminder_at_stern_threshold() {
    let tracker = ExploratoryStreakTracker::new(2, 4);
    for _ in 0..3 {
        tracker.record(false);
    }
    assert_eq!(tracker.record(false), Some(ExploratoryReminder::Stern));
}

#[test]
fn breaking_the_streak_resets_and_suppresses_reminder() {
    let tracker = ExploratoryStreakTracker::new(2, 4);
    tracker.record(false);
    tracker.record(false);
    assert_eq!(tracker.record(true), None);
    assert_eq!(tracker.current_streak(), 0);
}

#[test]
fn reset_clears_streak_directly() {
    let tracker = ExploratoryStreakTracker::new(2, 4);
    tracker.record(false);
    tracker.reset();
    assert_eq!(tracker.current_streak(), 0);
}

#[test]
fn reminder_messages_are_distinct_and_non_empty() {
    assert_ne!(
        ExploratoryReminder::Gentle.message(),
        ExploratoryReminder::Stern.message()
    );
    assert!(!ExploratoryReminder::Gentle.message().is_empty());
}
