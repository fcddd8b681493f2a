use crate::store::KvStore;
use redis::{aio::ConnectionManager, AsyncCommands};
use tracing::debug;

/// Open a managed connection to the redis server at `addr`, e.g. `redis://localhost:6379`.
///
/// Responses are never decoded on the client side: values come back as the raw bytes
/// that were written.
pub async fn connect(addr: &str) -> anyhow::Result<ConnectionManager> {
    let client = redis::Client::open(addr)?;
    let conn = ConnectionManager::new(client).await?;
    debug!("connected to redis at {addr}");
    Ok(conn)
}

#[async_trait::async_trait]
impl KvStore for ConnectionManager {
    async fn flush(&mut self) -> anyhow::Result<()> {
        let _: () = redis::cmd("FLUSHDB").query_async(self).await?;
        Ok(())
    }

    async fn set(&mut self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        let _: () = AsyncCommands::set(self, key, value).await?;
        Ok(())
    }

    async fn get(&mut self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let value: Option<Vec<u8>> = AsyncCommands::get(self, key).await?;
        Ok(value)
    }

    async fn incr(&mut self, key: &str) -> anyhow::Result<i64> {
        Ok(AsyncCommands::incr(self, key, 1).await?)
    }
}
