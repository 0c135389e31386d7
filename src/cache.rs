//! Value cache over a [`KvStore`] with an instrumented `store` operation and
//! typed getters.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::instrument::{CallRecorder, OperationName};
use crate::render::Arg;
use crate::replay::{replay, Report};
use crate::store::KvStore;

/// Qualified name under which `Cache::store` records its calls.
pub const STORE_OPERATION: &str = "Cache.store";

pub struct Cache {
    store: Arc<dyn KvStore>,
    recorder: CallRecorder,
    store_op: OperationName,
}

impl Cache {
    /// Flushes the backing store and returns a cache over it.
    pub async fn new(store: Arc<dyn KvStore>) -> Result<Self> {
        store.flush().await?;
        tracing::debug!("Backing store flushed");
        Ok(Self::attach(store))
    }

    /// Uses the store as-is, keeping existing keys and history.
    pub fn attach(store: Arc<dyn KvStore>) -> Self {
        Self {
            recorder: CallRecorder::new(store.clone()),
            store,
            store_op: OperationName::new(STORE_OPERATION),
        }
    }

    pub fn recorder(&self) -> &CallRecorder {
        &self.recorder
    }

    /// Stores `data` under a fresh UUID key and returns the key.
    /// Counted and recorded under [`STORE_OPERATION`].
    pub async fn store(&self, data: impl Into<Arg>) -> Result<String> {
        let args = [data.into()];
        self.recorder
            .invoke(&self.store_op, &args, || async {
                let key = Uuid::new_v4().to_string();
                self.store.set(&key, &args[0].to_bytes()).await?;
                Ok::<_, Error>(key)
            })
            .await
    }

    /// Raw bytes at `key`, `None` if absent.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Fetches `key` and decodes it with `transform`.
    ///
    /// An absent key yields `Ok(None)` without calling `transform`. A failing
    /// transform becomes [`Error::Malformed`].
    pub async fn get_with<T, E, F>(&self, key: &str, transform: F) -> Result<Option<T>>
    where
        E: Display,
        F: FnOnce(Vec<u8>) -> std::result::Result<T, E>,
    {
        match self.store.get(key).await? {
            None => Ok(None),
            Some(raw) => transform(raw).map(Some).map_err(|e| Error::malformed(key, e)),
        }
    }

    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, String::from_utf8).await
    }

    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, parse_text::<i64>).await
    }

    pub async fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, parse_text::<f64>).await
    }

    /// History of every `store` call so far.
    pub async fn replay(&self) -> Result<Report> {
        replay(self.store.as_ref(), &self.store_op).await
    }

    pub async fn call_count(&self) -> Result<i64> {
        self.recorder.calls(&self.store_op).await
    }
}

/// Parses UTF-8 text, ignoring surrounding whitespace.
fn parse_text<T>(raw: Vec<u8>) -> std::result::Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    let text = String::from_utf8(raw).map_err(|e| e.to_string())?;
    text.trim()
        .parse()
        .map_err(|e: T::Err| format!("{:?}: {}", text, e))
}
