use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

pub mod memory;
pub mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// The primitives the caching layer needs from a key-value store.
///
/// Each call is atomic on its own; nothing spans several calls.
/// Implementations must behave like the Redis command of the same name.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// GET: raw bytes, or `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// SET: overwrite the value and drop any expiry.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// SETEX: set with an expiry in whole seconds. A zero TTL is rejected.
    async fn set_ex(&self, key: &str, ttl: Duration, value: &[u8]) -> Result<()>;

    /// INCR: absent keys start at 0. Returns the new value.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// RPUSH: append to the list at `key`. Returns the new length.
    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// LRANGE with inclusive bounds; negative indices count from the end.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;

    /// FLUSHDB
    async fn flush(&self) -> Result<()>;
}

/// Whole-second TTL as SETEX takes it.
pub(crate) fn ttl_secs(ttl: Duration) -> Result<u64> {
    match ttl.as_secs() {
        0 => Err(crate::Error::store("invalid expire time in 'setex' command")),
        secs => Ok(secs),
    }
}
