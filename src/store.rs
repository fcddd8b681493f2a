/// Primitives the cache needs from the underlying key-value store.
///
/// Every method maps onto exactly one store command, so atomicity is whatever the store
/// gives a single command. Implementations must return the value bytes untouched.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    /// Drop every key in the selected database.
    async fn flush(&mut self) -> anyhow::Result<()>;

    async fn set(&mut self, key: &str, value: &[u8]) -> anyhow::Result<()>;

    /// `Ok(None)` when the key does not exist.
    async fn get(&mut self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;

    /// Increment the integer stored at `key` by one and return the new value. A missing key
    /// counts as zero.
    async fn incr(&mut self, key: &str) -> anyhow::Result<i64>;
}
