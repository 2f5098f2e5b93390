use std::thread::sleep;
use std::time::Duration;

use super::*;

#[test]
fn elapsed_is_zero_before_start() {
    let manager = TurnManager::new();
    assert_eq!(manager.elapsed(), Duration::ZERO);
}

#[test]
fn elapsed_grows_after_start() {
    let mut manager = TurnManager::new();
    manager.start_turn();
    sleep(Duration::from_millis(10));
    assert!(manager.elapsed() >= Duration::from_millis(10));
}

#[test]
fn reset_turn_clears_elapsed() {
    let mut manager = TurnManager::new();
    manager.start_turn();
    sleep(Duration::from_millis(5));
    manager.reset_turn();
    assert_eq!(manager.elapsed(), Duration::ZERO);
}

#[test]
fn no_max_duration_never_exceeds() {
    let mut manager = TurnManager::new();
    manager.start_turn();
    assert!(!manager.is_max_duration_exceeded());
    assert_eq!(manager.get_remaining_minutes(), None);
}

#[test]
fn max_duration_exceeded_after_budget() {
    let mut manager = TurnManager::new();
    manager.start_turn();
    manager.set_max_duration(0.0001); // ~6ms
    sleep(Duration::from_millis(20));
    assert!(manager.is_max_duration_exceeded());
}

#[test]
fn remaining_minutes_shrinks_toward_zero() {
    let mut manager = TurnManager::new();
    manager.start_turn();
    manager.set_max_duration(1.0);
    let remaining = manager.get_remaining_minutes().unwrap();
    assert!(remaining <= 1.0);
    assert!(remaining > 0.0);
}
