//! HTTP client with retrying fetch
//!
//! [`RetryingClient`] is the single network capability the crate needs: issue
//! a GET, decode the JSON body, and retry transient failures through
//! [`fetch_with_retry`](crate::retry::fetch_with_retry). It is deliberately
//! not a general-purpose HTTP client.

use crate::config::{Config, RetryConfig};
use crate::error::{Error, Result};
use crate::retry::{IsRetryable, fetch_with_retry};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// HTTP client wrapping `reqwest` with per-attempt timeout and bounded
/// exponential-backoff retry
///
/// Cloning is cheap: the inner `reqwest::Client` is reference-counted.
#[derive(Clone, Debug)]
pub struct RetryingClient {
    http: reqwest::Client,
    retry: RetryConfig,
}

impl RetryingClient {
    /// Create a client from the pipeline configuration.
    ///
    /// The timeout applies to each individual HTTP attempt, not to a whole
    /// retry sequence.
    ///
    /// # Errors
    /// Returns [`Error::Network`] if the underlying client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_timeout(config.request_timeout, config.retry.clone())
    }

    /// Create a client with an explicit timeout and retry policy.
    ///
    /// # Errors
    /// Returns [`Error::Network`] if the underlying client cannot be built.
    pub fn with_timeout(timeout: Duration, retry: RetryConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("flatfetch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, retry })
    }

    /// Fetch `url` and decode the JSON body as `T`, retrying transient
    /// failures.
    ///
    /// A network error, per-attempt timeout, or non-2xx status counts as a
    /// transient failure and is retried with exponential backoff. A body that
    /// decodes but does not match `T` is permanent and fails immediately.
    ///
    /// # Errors
    /// Returns [`Error::RetriesExhausted`] carrying the URL and the last
    /// underlying failure once the retry budget is spent, or
    /// [`Error::Serialization`] for an undecodable body.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let attempts = self.retry.max_retries + 1;

        fetch_with_retry(&self.retry, move || self.fetch_once(url))
            .await
            .map_err(|e| {
                // A retryable error leaving the loop means the budget was
                // spent; a permanent one never consumed it
                if e.is_retryable() {
                    Error::RetriesExhausted {
                        url: url.to_string(),
                        attempts,
                        source: Box::new(e),
                    }
                } else {
                    e
                }
            })
    }

    /// One HTTP attempt: GET, status check, body decode.
    async fn fetch_once<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
