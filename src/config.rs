use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::web::DEFAULT_PAGE_TTL;

pub const REDIS_URL_VAR: &str = "KVMEMO_REDIS_URL";
pub const PAGE_TTL_VAR: &str = "KVMEMO_PAGE_TTL_SECS";
pub const FETCH_TIMEOUT_VAR: &str = "KVMEMO_FETCH_TIMEOUT_SECS";

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub redis_url: String,
    pub page_ttl_secs: u64,
    /// No timeout is imposed when unset.
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.to_string(),
            page_ttl_secs: DEFAULT_PAGE_TTL.as_secs(),
            fetch_timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source; unset variables keep defaults.
    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(REDIS_URL_VAR) {
            config.redis_url = url;
        }
        if let Some(raw) = lookup(PAGE_TTL_VAR) {
            config.page_ttl_secs = parse_secs(PAGE_TTL_VAR, &raw)?;
        }
        if let Some(raw) = lookup(FETCH_TIMEOUT_VAR) {
            config.fetch_timeout_secs = Some(parse_secs(FETCH_TIMEOUT_VAR, &raw)?);
        }

        Ok(config)
    }

    pub fn page_ttl(&self) -> Duration {
        Duration::from_secs(self.page_ttl_secs)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_secs(name: &str, raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(Error::Config(format!("{} must be at least 1 second", name))),
        Ok(secs) => Ok(secs),
        Err(e) => Err(Error::Config(format!("{}={:?}: {}", name, raw, e))),
    }
}
