//! Error types for flatfetch
//!
//! This module provides the error taxonomy for the retrieval pipeline:
//! - Transport and HTTP-status failures (transient, retried with backoff)
//! - Terminal request failures after retry exhaustion, carrying the URL
//! - Configuration, serialization and sink errors (permanent)

use thiserror::Error;

/// Result type alias for flatfetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for flatfetch
///
/// Each variant includes contextual information to help diagnose issues.
/// Whether a variant is retried is decided by [`IsRetryable`](crate::retry::IsRetryable),
/// not by the variant itself.
#[derive(Debug, Error)]
pub enum Error {
    /// Network error (connect failure, timeout, body read failure)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success HTTP status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// The status code returned by the server
        status: u16,
        /// The URL that produced the status
        url: String,
    },

    /// A request failed permanently after all retry attempts were exhausted
    #[error("request to {url} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// The URL whose fetch was abandoned
        url: String,
        /// Total number of attempts made (initial call + retries)
        attempts: u32,
        /// The last underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// Response body could not be decoded as the expected JSON shape
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV sink error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Attempt count recorded on a terminal request failure, if any.
    ///
    /// Returns `None` for errors that never went through the retry loop.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Error::RetriesExhausted { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_display_includes_status_and_url() {
        let err = Error::HttpStatus {
            status: 503,
            url: "http://api.test/users".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("http://api.test/users"));
    }

    #[test]
    fn retries_exhausted_display_includes_url_attempts_and_cause() {
        let err = Error::RetriesExhausted {
            url: "http://api.test/posts?userId=2".to_string(),
            attempts: 4,
            source: Box::new(Error::HttpStatus {
                status: 500,
                url: "http://api.test/posts?userId=2".to_string(),
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("4 attempts"));
        assert!(msg.contains("http://api.test/posts?userId=2"));
        assert!(msg.contains("HTTP 500"));
    }

    #[test]
    fn attempts_is_some_only_for_exhausted_requests() {
        let exhausted = Error::RetriesExhausted {
            url: "http://api.test/users".to_string(),
            attempts: 3,
            source: Box::new(Error::HttpStatus {
                status: 500,
                url: "http://api.test/users".to_string(),
            }),
        };
        assert_eq!(exhausted.attempts(), Some(3));

        let config = Error::Config {
            message: "bad base_url".to_string(),
            key: Some("base_url".to_string()),
        };
        assert_eq!(config.attempts(), None);
    }

    #[test]
    fn serialization_error_converts_via_from() {
        let json_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn io_error_converts_via_from() {
        let err: Error = std::io::Error::other("disk fail").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
