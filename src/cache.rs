use crate::counter::CallCounter;
use crate::store::KvStore;
use crate::value::{self, Decode, Decoded, StoreValue};
use tracing::{debug, info};

const STORE_CALLS: CallCounter = CallCounter::new("Cache.store");

/// Stores values under freshly generated keys and reads them back with an optional decoder.
///
/// The cache owns nothing but the store handle: values, keys and call counters all live in the
/// store. Cloning a `Cache` clones the handle.
#[derive(Clone, Debug)]
pub struct Cache<S: KvStore> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap `store`, leaving its existing keys alone.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Wrap `store` after dropping every key in its database.
    pub async fn with_flush(store: S) -> anyhow::Result<Self> {
        let mut cache = Self::new(store);
        cache.flush().await?;
        Ok(cache)
    }

    pub async fn flush(&mut self) -> anyhow::Result<()> {
        self.store.flush().await?;
        info!("cache database flushed");
        Ok(())
    }

    /// Write `data` under a new random key and return that key.
    ///
    /// Every call bumps the `Cache.store` counter first, so a failed write still counts.
    pub async fn store(&mut self, data: impl Into<StoreValue>) -> anyhow::Result<String> {
        STORE_CALLS.hit(&mut self.store).await?;

        let key = uuid::Uuid::new_v4().to_string();
        self.store.set(&key, &data.into().to_bytes()).await?;
        debug!("stored value under {key}");

        Ok(key)
    }

    /// Raw bytes under `key`, `None` if it was never written.
    pub async fn get(&mut self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Like [`Cache::get`], passing a present value through `decode`.
    pub async fn get_with<T, F>(&mut self, key: &str, decode: F) -> anyhow::Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> anyhow::Result<T>,
    {
        self.get(key).await?.map(decode).transpose()
    }

    pub async fn get_as(&mut self, key: &str, decode: Decode) -> anyhow::Result<Option<Decoded>> {
        self.get_with(key, |raw| decode.apply(raw)).await
    }

    pub async fn get_str(&mut self, key: &str) -> anyhow::Result<Option<String>> {
        self.get_with(key, value::utf8).await
    }

    pub async fn get_int(&mut self, key: &str) -> anyhow::Result<Option<i64>> {
        self.get_with(key, value::integer).await
    }

    /// How many times `store` has run against this database.
    pub async fn store_calls(&mut self) -> anyhow::Result<i64> {
        STORE_CALLS.count(&mut self.store).await
    }

    /// Read the call counter kept for an arbitrary operation name.
    pub async fn call_count(&mut self, op: &'static str) -> anyhow::Result<i64> {
        CallCounter::new(op).count(&mut self.store).await
    }

    pub fn store_handle(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
