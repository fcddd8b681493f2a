use crate::store::KvStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-process stand-in for the redis server.
///
/// Clones share the same keyspace, the way clones of a redis connection manager talk to the
/// same database. `fail_next` makes upcoming commands of one kind fail, so callers can check
/// that store errors reach them unchanged.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    data: HashMap<String, Vec<u8>>,
    pending_failures: HashMap<&'static str, usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `n` invocations of `command` (`FLUSHDB`, `SET`, `GET` or `INCR`).
    pub fn fail_next(&self, command: &'static str, n: usize) {
        self.lock().pending_failures.insert(command, n);
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.lock().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // a panicked holder cannot leave the map half-written, every mutation is a single call
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self, command: &'static str) -> anyhow::Result<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.lock();
        if let Some(left) = inner.pending_failures.get_mut(command).filter(|n| **n > 0) {
            *left -= 1;
            anyhow::bail!("injected failure on {command}");
        }
        Ok(inner)
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryStore {
    async fn flush(&mut self) -> anyhow::Result<()> {
        self.begin("FLUSHDB")?.data.clear();
        Ok(())
    }

    async fn set(&mut self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        self.begin("SET")?.data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn get(&mut self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.begin("GET")?.data.get(key).cloned())
    }

    async fn incr(&mut self, key: &str) -> anyhow::Result<i64> {
        let mut inner = self.begin("INCR")?;
        let current = match inner.data.get(key) {
            Some(raw) => std::str::from_utf8(raw)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| anyhow::anyhow!("ERR value is not an integer or out of range"))?,
            None => 0,
        };
        let next = current
            .checked_add(1)
            .ok_or_else(|| anyhow::anyhow!("ERR increment or decrement would overflow"))?;
        inner.data.insert(key.to_string(), next.to_string().into_bytes());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn incr_starts_from_zero() {
        let mut store = MemoryStore::new();
        assert_eq!(store.incr("hits").await.unwrap(), 1);
        assert_eq!(store.incr("hits").await.unwrap(), 2);
        assert_eq!(store.get("hits").await.unwrap(), Some(b"2".to_vec()));
    }

    #[tokio::test]
    async fn incr_rejects_non_integer_values() {
        let mut store = MemoryStore::new();
        store.set("name", b"maid").await.unwrap();
        let err = store.incr("name").await.unwrap_err();
        assert!(err.to_string().contains("not an integer"));
        assert_eq!(store.get("name").await.unwrap(), Some(b"maid".to_vec()));
    }

    #[tokio::test]
    async fn clones_share_the_keyspace() {
        let mut a = MemoryStore::new();
        let mut b = a.clone();
        a.set("k", b"v").await.unwrap();
        assert_eq!(b.get("k").await.unwrap(), Some(b"v".to_vec()));
        b.flush().await.unwrap();
        assert!(a.is_empty());
    }

    #[tokio::test]
    async fn injected_failures_are_consumed() {
        let mut store = MemoryStore::new();
        store.fail_next("SET", 1);
        assert!(store.get("k").await.is_ok());
        assert!(store.set("k", b"v").await.is_err());
        assert!(store.set("k", b"v").await.is_ok());
        assert_eq!(store.len(), 1);
    }
}
