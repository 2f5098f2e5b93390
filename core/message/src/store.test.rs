use super::*;
use relay_protocol::Message;

#[test]
fn append_preserves_insertion_order() {
    let mut store = ConversationStore::new();
    store.append(Message::user("m1", "first", 0));
    store.append(Message::user("m2", "second", 1));
    let ids: Vec<_> = store.messages().iter().map(|m| m.id.clone()).collect();
    assert_eq!(ids, vec!["m1".to_string(), "m2".to_string()]);
}

#[test]
fn remove_by_id_drops_only_that_message() {
    let mut store = ConversationStore::new();
    store.append(Message::user("m1", "first", 0));
    store.append(Message::user("m2", "second", 1));
    assert!(store.remove_by_id(&"m1".to_string()));
    assert_eq!(store.message_count(), 1);
    assert_eq!(store.messages()[0].id, "m2");
}

#[test]
fn remove_by_id_missing_returns_false() {
    let mut store = ConversationStore::new();
    store.append(Message::user("m1", "first", 0));
    assert!(!store.remove_by_id(&"missing".to_string()));
}

#[test]
fn replace_preserves_position() {
    let mut store = ConversationStore::new();
    store.append(Message::user("m1", "first", 0));
    store.append(Message::user("m2", "second", 1));
    store.replace(&"m1".to_string(), Message::user("m1", "rewritten", 2));
    assert_eq!(store.messages()[0].content, "rewritten");
    assert_eq!(store.messages()[1].id, "m2");
}

#[test]
fn trim_head_drops_oldest() {
    let mut store = ConversationStore::new();
    for i in 0..5 {
        store.append(Message::user(format!("m{i}"), "x", i as i64));
    }
    store.trim_head(3);
    assert_eq!(store.message_count(), 2);
    assert_eq!(store.messages()[0].id, "m3");
}

#[test]
fn trim_head_beyond_length_clears_everything() {
    let mut store = ConversationStore::new();
    store.append(Message::user("m1", "x", 0));
    store.trim_head(100);
    assert_eq!(store.message_count(), 0);
}

#[test]
fn interjections_drain_in_staged_order() {
    let mut store = ConversationStore::new();
    store.add_user_interjection("first");
    store.add_user_interjection("second");
    assert!(store.has_pending_interjections());

    let mut counter = 0;
    let drained = store.drain_interjections(
        || {
            counter += 1;
            format!("interjection-{counter}")
        },
        || 42,
    );

    assert_eq!(drained.len(), 2);
    assert_eq!(drained[0].content, "first");
    assert_eq!(drained[1].content, "second");
    assert!(!store.has_pending_interjections());
}

#[test]
fn reset_clears_messages_and_interjections() {
    let mut store = ConversationStore::new();
    store.append(Message::user("m1", "x", 0));
    store.add_user_interjection("hi");
    store.reset();
    assert_eq!(store.message_count(), 0);
    assert!(!store.has_pending_interjections());
}
