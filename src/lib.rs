//! # flatfetch
//!
//! Resilient retrieval of hierarchical API data (users → posts → comments)
//! flattened into tabular rows.
//!
//! ## Design Philosophy
//!
//! flatfetch is designed to be:
//! - **Resilient** - transient fetch failures retry with bounded exponential
//!   backoff, and one bad branch never aborts the whole run
//! - **Sensible defaults** - works out of the box with zero configuration
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//! - **Pure decisions, effectful shell** - validation and ordering are pure;
//!   logging and I/O happen at the orchestration layer
//!
//! ## Quick Start
//!
//! ```no_run
//! use flatfetch::{Config, run_to_csv};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         base_url: "https://jsonplaceholder.typicode.com".to_string(),
//!         posts_per_user: 5,
//!         comments_per_post: 3,
//!         ..Default::default()
//!     };
//!
//!     let rows = run_to_csv(&config, "report.csv".as_ref()).await?;
//!     println!("wrote {rows} rows");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// API layer: endpoint URLs, fetches, per-entity ordering rules
pub mod api;
/// HTTP client with retrying fetch
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Pipeline orchestration (fan-out, failure isolation, flattening)
pub mod pipeline;
/// Retry logic with bounded exponential backoff
pub mod retry;
/// CSV sink for flattened rows
pub mod sink;
/// Core data model
pub mod types;
/// Required-field validation for fetched entities
pub mod validate;

// Re-export commonly used types
pub use api::ApiClient;
pub use client::RetryingClient;
pub use config::{Config, RetryConfig};
pub use error::{Error, Result};
pub use types::{Comment, FlatRecord, Post, User};
pub use validate::Validate;

use std::path::Path;

/// Run the whole pipeline against `config` and persist the rows as CSV.
///
/// Convenience entry point tying the layers together: build the API client,
/// run the orchestrated fan-out, write the sink. Returns the number of rows
/// written.
///
/// A fatal user-listing failure (and nothing below it) surfaces as `Err`;
/// callers mapping that to a process exit status get the abort semantics of
/// the pipeline for free.
///
/// # Errors
/// Returns configuration, fatal fetch, or sink errors.
pub async fn run_to_csv(config: &Config, output: &Path) -> Result<usize> {
    let api = ApiClient::new(config)?;
    let records = pipeline::run(&api).await?;
    sink::write_csv(&records, output)?;
    Ok(records.len())
}
