use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

use super::{ttl_secs, KvStore};
use crate::error::{Error, Result};

const WRONGTYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

#[derive(Debug, Clone)]
enum Slot {
    Bytes(Vec<u8>),
    List(Vec<Vec<u8>>),
}

#[derive(Debug, Clone)]
struct Entry {
    slot: Slot,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// In-process store with Redis semantics for the commands in [`KvStore`].
///
/// Expiry is lazy: an entry past its deadline is dropped the next time its key
/// is touched. Time comes from `tokio::time`, so paused test clocks apply.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys.
    pub fn len(&self) -> Result<usize> {
        let now = Instant::now();
        let entries = self
            .entries
            .lock()
            .map_err(|_| Error::store("memory store lock poisoned"))?;
        Ok(entries.values().filter(|e| !e.is_expired(now)).count())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Locks the map and drops `key` if it has expired.
    fn entries_for(&self, key: &str) -> Result<MutexGuard<'_, HashMap<String, Entry>>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::store("memory store lock poisoned"))?;
        if entries.get(key).is_some_and(|e| e.is_expired(Instant::now())) {
            entries.remove(key);
        }
        Ok(entries)
    }
}

/// Resolves Redis-style inclusive `start..=stop` against a list of `len` items.
pub(crate) fn range_bounds(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.entries_for(key)?;
        match entries.get(key) {
            None => Ok(None),
            Some(Entry { slot: Slot::Bytes(bytes), .. }) => Ok(Some(bytes.clone())),
            Some(_) => Err(Error::store(WRONGTYPE)),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries_for(key)?;
        entries.insert(
            key.to_string(),
            Entry {
                slot: Slot::Bytes(value.to_vec()),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn set_ex(&self, key: &str, ttl: Duration, value: &[u8]) -> Result<()> {
        let secs = ttl_secs(ttl)?;
        let mut entries = self.entries_for(key)?;
        entries.insert(
            key.to_string(),
            Entry {
                slot: Slot::Bytes(value.to_vec()),
                expires_at: Some(Instant::now() + Duration::from_secs(secs)),
            },
        );
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries_for(key)?;
        let entry = entries.entry(key.to_string()).or_insert_with(|| Entry {
            slot: Slot::Bytes(b"0".to_vec()),
            expires_at: None,
        });
        let Slot::Bytes(bytes) = &mut entry.slot else {
            return Err(Error::store(WRONGTYPE));
        };
        let current: i64 = std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::store("value is not an integer or out of range"))?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| Error::store("increment or decrement would overflow"))?;
        *bytes = next.to_string().into_bytes();
        Ok(next)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut entries = self.entries_for(key)?;
        let entry = entries.entry(key.to_string()).or_insert_with(|| Entry {
            slot: Slot::List(Vec::new()),
            expires_at: None,
        });
        match &mut entry.slot {
            Slot::List(items) => {
                items.push(value.to_vec());
                Ok(items.len())
            }
            Slot::Bytes(_) => Err(Error::store(WRONGTYPE)),
        }
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let entries = self.entries_for(key)?;
        match entries.get(key) {
            None => Ok(Vec::new()),
            Some(Entry { slot: Slot::List(items), .. }) => Ok(range_bounds(items.len(), start, stop)
                .map(|(from, to)| items[from..=to].to_vec())
                .unwrap_or_default()),
            Some(_) => Err(Error::store(WRONGTYPE)),
        }
    }

    async fn flush(&self) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| Error::store("memory store lock poisoned"))?
            .clear();
        Ok(())
    }
}
