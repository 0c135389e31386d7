//! Error types for kvmemo

use thiserror::Error;

/// Result type alias for kvmemo
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A primitive against the backing store failed
    #[error("Store error: {0}")]
    Store(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Stored bytes could not be decoded by the requested transform
    #[error("Malformed value at {key}: {reason}")]
    Malformed { key: String, reason: String },

    /// Fetch returned a non-success status
    #[error("Fetch of {url} returned {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Fetch failed in a non-HTTP fetcher
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    pub fn malformed(key: &str, reason: impl std::fmt::Display) -> Self {
        Self::Malformed {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Store-unavailable class: the backing store rejected or failed a primitive.
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Redis(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    /// Fetch-failure class: transport error or non-success status.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::HttpStatus { .. } | Self::Http(_) | Self::Fetch(_))
    }
}
