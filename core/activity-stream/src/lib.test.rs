use std::sync::Arc;
use std::sync::Mutex;

use relay_protocol::ActivityEvent;
use relay_protocol::EventKind;

use super::*;

#[test]
fn matching_kind_is_delivered() {
    let stream = ActivityStream::new();
    let received = Arc::new(Mutex::new(Vec::new()));
    let received_clone = received.clone();
    stream.subscribe(Topic::Kind(EventKind::ToolCallStart), move |event| {
        received_clone.lock().expect("lock poisoned").push(event.kind);
    });

    stream.emit(ActivityEvent::new(EventKind::ToolCallStart));
    stream.emit(ActivityEvent::new(EventKind::ToolCallEnd));

    let got = received.lock().expect("lock poisoned");
    assert_eq!(got.as_slice(), [EventKind::ToolCallStart]);
}

#[test]
fn wildcard_receives_everything() {
    let stream = ActivityStream::new();
    let count = Arc::new(Mutex::new(0));
    let count_clone = count.clone();
    stream.subscribe(Topic::All, move |_| {
        *count_clone.lock().expect("lock poisoned") += 1;
    });

    stream.emit(ActivityEvent::new(EventKind::AgentStart));
    stream.emit(ActivityEvent::new(EventKind::AgentEnd));

    assert_eq!(*count.lock().expect("lock poisoned"), 2);
}

#[test]
fn handlers_fire_in_registration_order() {
    let stream = ActivityStream::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    for i in 0..3 {
        let order_clone = order.clone();
        stream.subscribe(Topic::All, move |_| {
            order_clone.lock().expect("lock poisoned").push(i);
        });
    }

    stream.emit(ActivityEvent::new(EventKind::AgentStart));
    assert_eq!(order.lock().expect("lock poisoned").as_slice(), [0, 1, 2]);
}

#[test]
fn unsubscribe_stops_delivery() {
    let stream = ActivityStream::new();
    let count = Arc::new(Mutex::new(0));
    let count_clone = count.clone();
    let id = stream.subscribe(Topic::All, move |_| {
        *count_clone.lock().expect("lock poisoned") += 1;
    });

    stream.unsubscribe(id);
    stream.emit(ActivityEvent::new(EventKind::AgentStart));
    assert_eq!(*count.lock().expect("lock poisoned"), 0);
    assert_eq!(stream.subscriber_count(), 0);
}

#[test]
fn panicking_handler_does_not_stop_later_subscribers() {
    let stream = ActivityStream::new();
    stream.subscribe(Topic::All, |_| panic!("boom"));
    let count = Arc::new(Mutex::new(0));
    let count_clone = count.clone();
    stream.subscribe(Topic::All, move |_| {
        *count_clone.lock().expect("lock poisoned") += 1;
    });

    stream.emit(ActivityEvent::new(EventKind::AgentStart));
    assert_eq!(*count.lock().expect("lock poisoned"), 1);
}
