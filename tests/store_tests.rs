use kvmemo::store::{KvStore, MemoryStore};
use std::time::Duration;

fn strings(items: Vec<Vec<u8>>) -> Vec<String> {
    items.into_iter().map(|i| String::from_utf8(i).unwrap()).collect()
}

#[tokio::test]
async fn test_get_absent_and_set() {
    let store = MemoryStore::new();

    assert_eq!(store.get("missing").await.unwrap(), None, "Absent key should be None");

    store.set("k", b"").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some(Vec::new()), "Empty value is not absent");

    store.set("k", b"v2").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some(b"v2".to_vec()));
}

#[tokio::test]
async fn test_incr_initializes_and_counts() {
    let store = MemoryStore::new();

    assert_eq!(store.incr("n").await.unwrap(), 1);
    assert_eq!(store.incr("n").await.unwrap(), 2);
    assert_eq!(store.get("n").await.unwrap(), Some(b"2".to_vec()), "Counter is stored as decimal text");

    store.set("text", b"cat").await.unwrap();
    let err = store.incr("text").await.unwrap_err();
    assert!(err.is_store(), "INCR on text should be a store error, got {:?}", err);

    store.set("max", i64::MAX.to_string().as_bytes()).await.unwrap();
    assert!(store.incr("max").await.unwrap_err().is_store(), "Overflow should be rejected");
}

#[tokio::test]
async fn test_rpush_lrange_ranges() {
    let store = MemoryStore::new();

    for (i, item) in ["a", "b", "c", "d"].iter().enumerate() {
        let len = store.rpush("list", item.as_bytes()).await.unwrap();
        assert_eq!(len, i + 1);
    }

    assert_eq!(strings(store.lrange("list", 0, -1).await.unwrap()), vec!["a", "b", "c", "d"]);
    assert_eq!(strings(store.lrange("list", 1, 2).await.unwrap()), vec!["b", "c"]);
    assert_eq!(strings(store.lrange("list", -2, -1).await.unwrap()), vec!["c", "d"]);
    assert_eq!(strings(store.lrange("list", 2, 10).await.unwrap()), vec!["c", "d"]);
    assert_eq!(strings(store.lrange("list", -10, 0).await.unwrap()), vec!["a"]);
    assert!(store.lrange("list", 5, 10).await.unwrap().is_empty());
    assert!(store.lrange("list", 3, 1).await.unwrap().is_empty());
    assert!(store.lrange("nothing", 0, -1).await.unwrap().is_empty(), "Missing list is empty");
}

#[tokio::test]
async fn test_wrong_type_errors() {
    let store = MemoryStore::new();
    store.set("text", b"cat").await.unwrap();
    store.rpush("list", b"a").await.unwrap();

    assert!(store.rpush("text", b"x").await.unwrap_err().is_store());
    assert!(store.lrange("text", 0, -1).await.unwrap_err().is_store());
    assert!(store.get("list").await.unwrap_err().is_store());
    assert!(store.incr("list").await.unwrap_err().is_store());
}

#[tokio::test(start_paused = true)]
async fn test_set_ex_expires() {
    let store = MemoryStore::new();
    store.set_ex("page", Duration::from_secs(10), b"body").await.unwrap();

    tokio::time::advance(Duration::from_secs(9)).await;
    assert_eq!(store.get("page").await.unwrap(), Some(b"body".to_vec()), "Still live at 9s");

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(store.get("page").await.unwrap(), None, "Expired at 11s");
    assert!(store.is_empty().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_set_clears_expiry() {
    let store = MemoryStore::new();
    store.set_ex("k", Duration::from_secs(1), b"short").await.unwrap();
    store.set("k", b"forever").await.unwrap();

    tokio::time::advance(Duration::from_secs(60)).await;
    assert_eq!(store.get("k").await.unwrap(), Some(b"forever".to_vec()));
}

#[tokio::test]
async fn test_set_ex_rejects_zero_ttl() {
    let store = MemoryStore::new();
    let err = store.set_ex("k", Duration::from_millis(500), b"v").await.unwrap_err();
    assert!(err.is_store(), "Sub-second TTL rounds to 0 and is rejected");
    assert_eq!(store.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn test_flush_clears_everything() {
    let store = MemoryStore::new();
    store.set("a", b"1").await.unwrap();
    store.incr("b").await.unwrap();
    store.rpush("c", b"x").await.unwrap();
    assert_eq!(store.len().unwrap(), 3);

    store.flush().await.unwrap();
    assert!(store.is_empty().unwrap());
    assert_eq!(store.get("a").await.unwrap(), None);
    assert_eq!(store.incr("b").await.unwrap(), 1, "Counter restarts after flush");
}
