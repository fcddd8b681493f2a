//! Runs against a real redis server, `REDIS_ADDR` or `redis://localhost:6379`.
//!
//! These flush the selected database, so they are ignored by default:
//! `cargo test -- --ignored` with a throwaway redis running.

use counted_cache::{redis_store, Cache};

async fn fresh_cache() -> Cache<redis::aio::ConnectionManager> {
    let addr = std::env::var("REDIS_ADDR").unwrap_or_else(|_| "redis://localhost:6379".into());
    let conn = redis_store::connect(&addr)
        .await
        .expect("fail to connect to redis");
    Cache::with_flush(conn).await.expect("fail to flush redis")
}

#[tokio::test]
#[ignore]
async fn hello_round_trip() {
    let mut cache = fresh_cache().await;

    let key = cache.store("hello").await.unwrap();
    assert_eq!(cache.get_str(&key).await.unwrap().as_deref(), Some("hello"));
    assert_eq!(cache.store_calls().await.unwrap(), 1);
}

#[tokio::test]
#[ignore]
async fn values_keep_their_bytes() {
    let mut cache = fresh_cache().await;

    let int_key = cache.store(42i64).await.unwrap();
    let float_key = cache.store(0.25f64).await.unwrap();
    let bytes_key = cache.store(vec![0u8, 255, 10]).await.unwrap();

    assert_eq!(cache.get_int(&int_key).await.unwrap(), Some(42));
    assert_eq!(cache.get(&float_key).await.unwrap(), Some(b"0.25".to_vec()));
    assert_eq!(cache.get(&bytes_key).await.unwrap(), Some(vec![0u8, 255, 10]));
    assert_eq!(cache.get("missing").await.unwrap(), None);
    assert_eq!(cache.store_calls().await.unwrap(), 3);
}
