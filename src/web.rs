//! URL fetch cache: each body is kept for a fixed TTL and every real fetch
//! is counted per URL.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::render::preview;
use crate::store::KvStore;

pub const DEFAULT_PAGE_TTL: Duration = Duration::from_secs(10);

/// Source of page bodies.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain HTTP GET via reqwest. Non-success statuses are errors.
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// `None` leaves the transport's own behaviour in place.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        Ok(response.text().await?)
    }
}

pub struct PageCache<F: Fetcher = HttpFetcher> {
    store: Arc<dyn KvStore>,
    fetcher: F,
    ttl: Duration,
}

impl<F: Fetcher> PageCache<F> {
    pub fn new(store: Arc<dyn KvStore>, fetcher: F) -> Self {
        Self {
            store,
            fetcher,
            ttl: DEFAULT_PAGE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn cache_key(url: &str) -> String {
        format!("cache:{}", url)
    }

    pub fn count_key(url: &str) -> String {
        format!("count:{}", url)
    }

    /// Returns the body of `url`, from cache while the entry is live.
    ///
    /// A hit means the cache key is present, even if the stored body is empty.
    /// The counter only moves on a miss, so it counts fetches rather than
    /// requests. A failed fetch still counts but caches nothing.
    pub async fn get_page(&self, url: &str) -> Result<String> {
        let cache_key = Self::cache_key(url);

        // 1. Cache
        if let Some(cached) = self.store.get(&cache_key).await? {
            tracing::debug!("Page cache hit for {}", url);
            return String::from_utf8(cached).map_err(|e| Error::malformed(&cache_key, e));
        }

        // 2. Count
        let count = self.store.incr(&Self::count_key(url)).await?;
        tracing::debug!("Page cache miss for {} (fetch #{})", url, count);

        // 3. Fetch
        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Fetch of {} failed: {}", url, e);
                return Err(e);
            }
        };

        // 4. Store with expiry
        self.store.set_ex(&cache_key, self.ttl, body.as_bytes()).await?;
        tracing::debug!("Cached {} for {:?}: {}", url, self.ttl, preview(&body, 80));

        Ok(body)
    }

    /// Number of real fetches made for `url`.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        let key = Self::count_key(url);
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(0);
        };
        std::str::from_utf8(&raw)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::malformed(&key, "access counter is not an integer"))
    }
}
