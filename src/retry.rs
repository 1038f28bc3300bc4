//! Retry logic with bounded exponential backoff
//!
//! This module provides the retry combinator used by the HTTP client for
//! transient failures. Backoff is deterministic doubling with an explicit
//! attempt counter: the wait before retry `k` (zero-based) is
//! `retry_delay * 2^k`, capped at `max_delay`. Waiting happens on
//! `tokio::time::sleep`, so a backing-off request never blocks sibling
//! in-flight requests.
//!
//! # Example
//!
//! ```no_run
//! use flatfetch::retry::{IsRetryable, fetch_with_retry};
//! use flatfetch::config::RetryConfig;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     Transient,
//!     Permanent,
//! }
//!
//! impl std::fmt::Display for MyError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{self:?}")
//!     }
//! }
//!
//! impl IsRetryable for MyError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, MyError::Transient)
//!     }
//! }
//!
//! # async fn example() -> Result<(), MyError> {
//! let config = RetryConfig::default();
//! let result = fetch_with_retry(&config, || async {
//!     // Your operation here
//!     Ok::<_, MyError>(())
//! }).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::RetryConfig;
use crate::error::Error;
use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
///
/// Transient failures (network errors, timeouts, bad-gateway responses)
/// should return `true`. Permanent failures (bad configuration, decode
/// errors, sink failures) should return `false`.
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

/// Implementation of IsRetryable for our Error type
impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            // Every fetch-level failure is treated as transient: transport
            // errors and non-2xx statuses alike go through the backoff loop.
            Error::Network(_) => true,
            Error::HttpStatus { .. } => true,
            // A terminal failure already consumed its retry budget
            Error::RetriesExhausted { .. } => false,
            // Config errors are permanent
            Error::Config { .. } => false,
            // A body that does not decode will not decode next time either
            Error::Serialization(_) => false,
            // Sink errors are permanent
            Error::Csv(_) => false,
            Error::Io(_) => false,
        }
    }
}

/// Execute an async operation with exponential backoff retry logic
///
/// # Arguments
///
/// * `config` - Retry configuration (max retries, base delay, delay cap)
/// * `operation` - Async closure returning `Result<T, E>` where `E` implements [`IsRetryable`]
///
/// # Returns
///
/// Returns the successful result, or the last error after `max_retries`
/// retries are exhausted. A permanently failing operation is therefore
/// invoked exactly `max_retries + 1` times.
pub async fn fetch_with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut attempt: u32 = 0;
    let mut delay = config.retry_delay;

    loop {
        tracing::info!(attempt = attempt + 1, "Issuing fetch attempt");

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    tracing::info!(attempts = attempt + 1, "Fetch succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && attempt < config.max_retries => {
                attempt += 1;

                let capped = delay.min(config.max_delay);
                tracing::warn!(
                    error = %e,
                    attempt = attempt,
                    max_retries = config.max_retries,
                    delay_ms = capped.as_millis(),
                    "Fetch failed, retrying after backoff"
                );

                tokio::time::sleep(capped).await;

                // Deterministic doubling, saturating to avoid overflow on
                // pathological configurations
                delay = delay.checked_mul(2).unwrap_or(Duration::MAX);
            }
            Err(e) => {
                if e.is_retryable() {
                    tracing::error!(
                        error = %e,
                        attempts = attempt + 1,
                        "Fetch failed after all retry attempts exhausted"
                    );
                } else {
                    tracing::error!(error = %e, "Fetch failed with non-retryable error");
                }
                return Err(e);
            }
        }
    }
}
