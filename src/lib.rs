pub mod error;
pub mod config;
pub mod store;
pub mod render;
pub mod instrument;
pub mod replay;
pub mod cache;
pub mod web;

// Re-export the main entry points for convenient access
pub use cache::{Cache, STORE_OPERATION};
pub use config::Config;
pub use error::{Error, Result};
pub use instrument::{CallRecorder, OperationName};
pub use render::{Arg, Render};
pub use replay::{replay, CallRecord, Report};
pub use store::{KvStore, MemoryStore, RedisStore};
pub use web::{Fetcher, HttpFetcher, PageCache};
