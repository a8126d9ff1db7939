//! Integration Tests for the LRU store
//!
//! Exercises the public API the way a wrapping layer would use it.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use byte_lru::{ByteSize, Config, EvictionCallback, LruStore};

static INIT: Once = Once::new();

/// Routes store logs to the test output, filtered by RUST_LOG.
fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "byte_lru=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

// == Test Value ==
/// Opaque payload that reports a fixed size.
#[derive(Debug, Clone, PartialEq)]
struct Blob {
    name: &'static str,
    bytes: usize,
}

impl ByteSize for Blob {
    fn size(&self) -> usize {
        self.bytes
    }
}

#[test]
fn test_add_update_then_evict_oldest() {
    init_tracing();
    let capacity = "key1key2value1value2".len() as i64;
    let mut store = LruStore::new(capacity, None);

    store.add("key1", "value1k1".to_string());
    store.add("key1", "value1".to_string());
    assert_eq!(store.get("key1"), Some(&"value1".to_string()));

    store.add("key2", "value2".to_string());
    store.add("k3", "v3".to_string());

    assert_eq!(store.get("key1"), None);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_unbounded_hit_and_miss() {
    init_tracing();
    let mut store = LruStore::new(0, None);

    store.add("key1", "1234".to_string());

    assert_eq!(store.get("key1").map(String::as_str), Some("1234"));
    assert_eq!(store.get("key2"), None);
}

#[test]
fn test_remove_oldest_drops_first_inserted() {
    init_tracing();
    let capacity = "key1key2value1value2".len() as i64;
    let mut store = LruStore::new(capacity, None);

    store.add("key1", "value1".to_string());
    store.add("key2", "value2".to_string());
    assert_eq!(store.len(), 2);

    store.remove_oldest();

    assert_eq!(store.get("key1"), None);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_on_evicted_records_keys_in_eviction_order() {
    init_tracing();
    let keys = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&keys);
    let callback: EvictionCallback<String> =
        Box::new(move |key: &str, _: &String| sink.borrow_mut().push(key.to_string()));
    let mut store = LruStore::new(10, Some(callback));

    store.add("key1", "123456".to_string());
    store.add("k2", "k2".to_string());
    store.add("k3", "k3".to_string());
    store.add("k4", "k4".to_string());

    assert_eq!(*keys.borrow(), vec!["key1".to_string(), "k2".to_string()]);
}

#[test]
fn test_callback_sees_entry_already_removed() {
    init_tracing();
    // Snapshot of what the callback was handed versus what remained.
    let seen = Rc::new(RefCell::new(Vec::<(String, usize)>::new()));
    let sink = Rc::clone(&seen);
    let mut store =
        LruStore::new(7, None).with_eviction_callback(move |key: &str, value: &Blob| {
            sink.borrow_mut().push((key.to_string(), value.size()));
        });

    store.add("a", Blob { name: "first", bytes: 3 });
    store.add("b", Blob { name: "second", bytes: 3 });

    assert_eq!(*seen.borrow(), vec![("a".to_string(), 3)]);
    assert!(!store.contains("a"));
    assert_eq!(store.current_bytes(), 4);
    assert_eq!(store.peek("b").map(|blob| blob.name), Some("second"));
}

#[test]
fn test_custom_value_accounting() {
    init_tracing();
    let mut store = LruStore::unbounded();

    store.add("x", Blob { name: "x", bytes: 100 });
    store.add("yy", Blob { name: "y", bytes: 0 });

    assert_eq!(store.current_bytes(), 101 + 2);

    store.add("x", Blob { name: "x2", bytes: 40 });
    assert_eq!(store.current_bytes(), 41 + 2);
    assert_eq!(store.keys().collect::<Vec<_>>(), vec!["x", "yy"]);
}

#[test]
fn test_store_from_config() {
    init_tracing();
    let config: Config = serde_json::from_str(r#"{"max_bytes": 5}"#).unwrap();
    let mut store = LruStore::from_config(&config);

    store.add("a", "11".to_string());
    store.add("b", "22".to_string());

    assert_eq!(store.keys().collect::<Vec<_>>(), vec!["b"]);
    assert_eq!(store.stats().evictions, 1);
}

#[test]
fn test_stats_snapshot_serializes() {
    init_tracing();
    let mut store = LruStore::new(100, None);

    store.add("key1", "value1".to_string());
    store.get("key1");
    store.get("missing");

    let stats = store.stats();
    assert_eq!(stats.hit_rate(), 0.5);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["current_bytes"], 10);
}
