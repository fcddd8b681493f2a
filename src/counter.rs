use crate::store::KvStore;

/// Counts invocations of a named operation in the store it runs against.
///
/// The counter lives under the operation name itself, e.g. `Cache.store`, and is bumped with a
/// single `INCR`, so concurrent callers never lose a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallCounter {
    name: &'static str,
}

impl CallCounter {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Record one call and return the running total.
    pub async fn hit<S: KvStore + ?Sized>(&self, store: &mut S) -> anyhow::Result<i64> {
        let count = store.incr(self.name).await?;
        tracing::trace!("{} called {count} times", self.name);
        Ok(count)
    }

    /// Current total, zero when the operation never ran.
    pub async fn count<S: KvStore + ?Sized>(&self, store: &mut S) -> anyhow::Result<i64> {
        match store.get(self.name).await? {
            Some(raw) => crate::value::integer(raw),
            None => Ok(0),
        }
    }
}
