use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use super::*;

#[tokio::test]
async fn fires_on_timeout_when_no_activity() {
    let fired = Arc::new(AtomicUsize::new(0));
    let fired_clone = fired.clone();
    let monitor = ActivityMonitor::new(Duration::from_millis(30), Duration::from_millis(5), move || {
        fired_clone.fetch_add(1, Ordering::SeqCst);
    });
    monitor.start();
    time::sleep(Duration::from_millis(80)).await;
    assert!(fired.load(Ordering::SeqCst) >= 1);
    monitor.stop();
}

#[tokio::test]
async fn record_activity_prevents_timeout() {
    let fired = Arc::new(AtomicUsize::new(0));
    let fired_clone = fired.clone();
    let monitor = ActivityMonitor::new(Duration::from_millis(40), Duration::from_millis(5), move || {
        fired_clone.fetch_add(1, Ordering::SeqCst);
    });
    monitor.start();
    for _ in 0..4 {
        time::sleep(Duration::from_millis(15)).await;
        monitor.record_activity();
    }
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    monitor.stop();
}

#[test]
fn nested_pause_resume_tracks_reference_count() {
    let monitor = ActivityMonitor::new(Duration::from_secs(5), Duration::from_millis(10), || {});
    monitor.pause();
    monitor.pause();
    monitor.pause();
    assert_eq!(monitor.pause_count(), 3);
    monitor.resume(true);
    monitor.resume(true);
    assert_eq!(monitor.pause_count(), 1);
    monitor.resume(true);
    assert_eq!(monitor.pause_count(), 0);
}

#[test]
fn resume_past_zero_is_a_no_op() {
    let monitor = ActivityMonitor::new(Duration::from_secs(5), Duration::from_millis(10), || {});
    monitor.resume(true);
    assert_eq!(monitor.pause_count(), 0);
}

#[test]
fn pause_past_safety_limit_resets_counter() {
    let monitor = ActivityMonitor::new(Duration::from_secs(5), Duration::from_millis(10), || {});
    for _ in 0..11 {
        monitor.pause();
    }
    assert_eq!(monitor.pause_count(), 0);
}

#[tokio::test]
async fn is_active_requires_started_unpaused_and_not_stopped() {
    let monitor = ActivityMonitor::new(Duration::from_secs(5), Duration::from_millis(10), || {});
    assert!(!monitor.is_active());
    monitor.start();
    assert!(monitor.is_active());
    monitor.pause();
    assert!(!monitor.is_active());
    monitor.resume(true);
    assert!(monitor.is_active());
    monitor.stop();
    assert!(!monitor.is_active());
}
