use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tendril::{SelectionSet, SelectionStore};

fn counting(store: &SelectionStore<String>) -> (Arc<AtomicUsize>, tendril::Subscription) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    let sub = store.subscribe(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    (count, sub)
}

fn set(keys: &[&str]) -> SelectionSet<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

// ============================================================================
// Toggle
// ============================================================================

#[test]
fn test_toggle_adds_then_removes() {
    let store = SelectionStore::new();
    let (count, _sub) = counting(&store);

    store.toggle("monstera".to_string());
    assert!(store.contains(&"monstera".to_string()));
    store.toggle("monstera".to_string());
    assert!(store.is_empty());
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_toggle_always_replaces_snapshot() {
    let store = SelectionStore::new();
    let first = store.snapshot();
    store.toggle("pothos".to_string());
    let second = store.snapshot();
    assert!(!Arc::ptr_eq(&first, &second));
    // The old snapshot is never mutated in place.
    assert!(first.is_empty());
}

// ============================================================================
// Replace
// ============================================================================

#[test]
fn test_replace_with_equal_set_is_silent() {
    let store = SelectionStore::with_selection(set(&["a", "b"]));
    let (count, _sub) = counting(&store);
    let before = store.snapshot();

    assert!(!store.replace(set(&["b", "a"])));
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(Arc::ptr_eq(&before, &store.snapshot()));
}

#[test]
fn test_replace_detects_same_size_different_members() {
    let store = SelectionStore::with_selection(set(&["a", "b"]));
    let (count, _sub) = counting(&store);

    assert!(store.replace(set(&["a", "c"])));
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(*store.snapshot(), set(&["a", "c"]));
}

// ============================================================================
// Bulk unselect and helpers
// ============================================================================

#[test]
fn test_bulk_unselect_notifies_only_on_removal() {
    let store = SelectionStore::with_selection(set(&["a", "b", "c"]));
    let (count, _sub) = counting(&store);

    let missing = ["x".to_string(), "y".to_string()];
    assert!(!store.bulk_unselect(&missing));
    assert_eq!(count.load(Ordering::SeqCst), 0);

    let some = ["a".to_string(), "x".to_string(), "c".to_string()];
    assert!(store.bulk_unselect(&some));
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(*store.snapshot(), set(&["b"]));
}

#[test]
fn test_clear_and_select_all() {
    let store = SelectionStore::new();
    let (count, _sub) = counting(&store);

    assert!(!store.clear());
    let all = ["a".to_string(), "b".to_string()];
    assert!(store.select_all(&all));
    assert!(!store.select_all(&all));
    assert_eq!(store.len(), 2);
    assert!(store.clear());
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_retain_prunes_keys() {
    let store = SelectionStore::with_selection(set(&["a", "b", "c"]));
    let keep: HashSet<String> = set(&["b", "z"]);
    assert!(store.retain(|k| keep.contains(k)));
    assert_eq!(*store.snapshot(), set(&["b"]));
}

// ============================================================================
// Subscriptions
// ============================================================================

#[test]
fn test_unsubscribe_stops_notifications() {
    let store = SelectionStore::new();
    let (count, sub) = counting(&store);
    assert_eq!(store.listener_count(), 1);

    sub.unsubscribe();
    assert_eq!(store.listener_count(), 0);
    store.toggle("a".to_string());
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn test_dropping_subscription_unsubscribes() {
    let store: SelectionStore<String> = SelectionStore::new();
    {
        let (_count, _sub) = counting(&store);
        assert_eq!(store.listener_count(), 1);
    }
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn test_listener_can_read_store() {
    let store = SelectionStore::new();
    let seen = Arc::new(AtomicUsize::new(0));
    let reader = store.clone();
    let s = Arc::clone(&seen);
    let _sub = store.subscribe(move || {
        s.store(reader.len(), Ordering::SeqCst);
    });

    store.toggle("a".to_string());
    store.toggle("b".to_string());
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[test]
fn test_clones_share_selection() {
    let store = SelectionStore::new();
    let other = store.clone();

    store.toggle(1u32);
    assert!(other.contains(&1));
    other.clear();
    assert!(store.is_empty());
    assert!(Arc::ptr_eq(&store.snapshot(), &other.snapshot()));
}
