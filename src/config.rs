//! Configuration types for flatfetch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Retry configuration for transient failures
///
/// Backoff is deterministic doubling: the wait before retry `k` (zero-based)
/// is `retry_delay * 2^k`, capped at `max_delay`. No jitter is applied, so a
/// given configuration always produces the same delay sequence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial call (default: 3)
    ///
    /// A permanently failing operation is invoked `max_retries + 1` times
    /// before the terminal error is returned. Zero disables retries.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry (default: 1 second)
    #[serde(default = "default_retry_delay", with = "duration_serde")]
    pub retry_delay: Duration,

    /// Maximum delay between retries (default: 60 seconds)
    #[serde(default = "default_max_delay", with = "duration_serde")]
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
            max_delay: default_max_delay(),
        }
    }
}

/// Main configuration for the retrieval pipeline
///
/// All fields have sensible defaults, so `Config::default()` targets the
/// public JSONPlaceholder instance and works without any configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the remote API (default: "https://jsonplaceholder.typicode.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Number of most-recent posts kept per user (default: 5)
    #[serde(default = "default_posts_per_user")]
    pub posts_per_user: usize,

    /// Number of most-recent comments kept per post (default: 3)
    #[serde(default = "default_comments_per_post")]
    pub comments_per_post: usize,

    /// Timeout for each individual HTTP attempt, not the whole retry
    /// sequence (default: 10 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Retry behavior for transient fetch failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            posts_per_user: default_posts_per_user(),
            comments_per_post: default_comments_per_post(),
            request_timeout: default_request_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Validate the configuration, returning the parsed base URL.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `base_url` is not an absolute HTTP-style
    /// URL that path segments can be appended to.
    pub fn parse_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| Error::Config {
            message: format!("invalid base_url '{}': {}", self.base_url, e),
            key: Some("base_url".to_string()),
        })?;
        if url.cannot_be_a_base() {
            return Err(Error::Config {
                message: format!("base_url '{}' cannot carry path segments", self.base_url),
                key: Some("base_url".to_string()),
            });
        }
        Ok(url)
    }
}

fn default_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

fn default_posts_per_user() -> usize {
    5
}

fn default_comments_per_post() -> usize {
    3
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(60)
}

// Duration serialization helper (seconds as u64)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
