use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use kvmemo::{Cache, Config, HttpFetcher, KvStore, PageCache, RedisStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    // 2. Config + Store
    let config = Config::from_env()?;
    tracing::debug!("Config: {}", serde_json::to_string(&config)?);

    let store: Arc<dyn KvStore> = Arc::new(
        RedisStore::connect(&config.redis_url)
            .await
            .with_context(|| format!("connecting to {}", config.redis_url))?,
    );
    tracing::info!("Connected to {}", config.redis_url);

    // 3. Store + Retrieve
    let cache = Cache::new(store.clone()).await?;
    let mut keys = Vec::new();
    for data in ["a", "b", "c"] {
        keys.push(cache.store(data).await?);
    }
    let number_key = cache.store(42i64).await?;

    println!("{:?}", cache.get(&keys[0]).await?);
    println!("{:?}", cache.get_str(&keys[1]).await?);
    println!("{:?}", cache.get_int(&number_key).await?);
    if let Err(e) = cache.get_int(&keys[2]).await {
        println!("get_int on text: {}", e);
    }

    // 4. Replay
    print!("{}", cache.replay().await?);

    // 5. Page cache (optional URL argument)
    if let Some(url) = std::env::args().nth(1) {
        let fetcher = match config.fetch_timeout() {
            Some(timeout) => HttpFetcher::with_timeout(Some(timeout))?,
            None => HttpFetcher::new(),
        };
        let pages = PageCache::new(store, fetcher).with_ttl(config.page_ttl());

        let first = pages.get_page(&url).await?;
        let second = pages.get_page(&url).await?;
        tracing::info!(
            "Fetched {} bytes, second read identical: {}",
            first.len(),
            first == second
        );
        println!("{} fetched {} time(s)", url, pages.access_count(&url).await?);
    }

    Ok(())
}
