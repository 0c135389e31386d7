//! Call counting and input/output history for named operations.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::render::{render_args, Arg, Render};
use crate::store::KvStore;

/// Stable name of an instrumented operation, e.g. `Cache.store`.
/// Also the namespace for its keys in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationName(String);

impl OperationName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// INCR counter key: the bare name.
    pub fn counter_key(&self) -> &str {
        &self.0
    }

    pub fn inputs_key(&self) -> String {
        format!("{}:inputs", self.0)
    }

    pub fn outputs_key(&self) -> String {
        format!("{}:outputs", self.0)
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OperationName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Wraps operations with a call counter and an append-only history.
///
/// The counter increment and the two log appends are separate store
/// primitives. Under concurrent callers they may interleave.
#[derive(Clone)]
pub struct CallRecorder {
    store: Arc<dyn KvStore>,
}

impl CallRecorder {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Bumps the invocation counter only. Returns the new count.
    pub async fn count_call(&self, name: &OperationName) -> Result<i64> {
        self.store.incr(name.counter_key()).await
    }

    /// Current invocation count; 0 if the operation never ran.
    pub async fn calls(&self, name: &OperationName) -> Result<i64> {
        let Some(raw) = self.store.get(name.counter_key()).await? else {
            return Ok(0);
        };
        std::str::from_utf8(&raw)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::malformed(name.counter_key(), "call counter is not an integer"))
    }

    /// Runs `op` with counting and history recording.
    ///
    /// If `op` fails its error is returned as-is and no output is appended,
    /// leaving the input log one entry longer than the output log.
    pub async fn invoke<T, F, Fut>(&self, name: &OperationName, args: &[Arg], op: F) -> Result<T>
    where
        T: Render,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        // 1. Count
        let count = self.count_call(name).await?;

        // 2. Record input
        let input = render_args(args);
        self.store.rpush(&name.inputs_key(), input.as_bytes()).await?;

        // 3. Run
        let result = match op().await {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!("{} call #{} failed: {}", name, count, e);
                return Err(e);
            }
        };

        // 4. Record output
        let output = result.render();
        self.store.rpush(&name.outputs_key(), output.as_bytes()).await?;
        tracing::debug!("{} call #{}: {} -> {}", name, count, input, output);

        Ok(result)
    }
}
