use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use super::{ttl_secs, KvStore};
use crate::error::Result;

/// [`KvStore`] backed by a Redis server.
///
/// The multiplexed connection is cheap to clone; every call works on its own
/// clone so the store can be shared behind an `Arc` without locking.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        tracing::debug!("Connected to redis at {}", url);
        Ok(Self { conn })
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        let () = conn.set(key, value).await?;
        Ok(())
    }

    async fn set_ex(&self, key: &str, ttl: Duration, value: &[u8]) -> Result<()> {
        let secs = ttl_secs(ttl)?;
        let mut conn = self.conn.clone();
        let () = conn.set_ex(key, value, secs).await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        let value: i64 = conn.incr(key, 1).await?;
        Ok(value)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut conn = self.conn.clone();
        let len: usize = conn.rpush(key, value).await?;
        Ok(len)
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let items: Vec<Vec<u8>> = conn.lrange(key, start, stop).await?;
        Ok(items)
    }

    async fn flush(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
        Ok(())
    }
}
